#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural obstacle layouts.
//!
//! Every layout implements [`ObstaclePlacement`] and computes obstacle cells
//! from the grid dimensions alone. Layouts are combined into a
//! [`PlacementChain`], whose result is the deduplicated union of its links,
//! and can be resolved by name through the [`Registry`].

mod chain;
mod dispersion;
mod random;
mod registry;
mod rotatable;
mod symmetrical;

use std::fmt;

use rand::RngCore;
use snake_core::Vector2i;
use thiserror::Error;

pub use chain::PlacementChain;
pub use dispersion::Dispersion;
pub use random::RandomLayout;
pub use registry::{Registry, CHAIN_SEPARATOR};
pub use rotatable::{Room, Separator, Walls};
pub use symmetrical::{Corners, Cross, Enclosure, Quads, XMark};

/// Failures raised while resolving layouts by name.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// No layout is registered under the provided name.
    #[error("unknown obstacle placement `{0}`")]
    UnknownName(String),
    /// A chain expression named no layouts at all.
    #[error("obstacle placement chain is empty")]
    EmptyChain,
}

/// Dimensions of the grid a layout is computed for, with derived landmarks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridMetrics {
    width: i32,
    height: i32,
}

impl GridMetrics {
    /// Captures the dimensions of a `width` by `height` grid.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Top-left cell.
    #[must_use]
    pub const fn min(&self) -> Vector2i {
        Vector2i::ZERO
    }

    /// Central cell, rounded toward the top-left.
    #[must_use]
    pub const fn mid(&self) -> Vector2i {
        Vector2i::new(self.width / 2, self.height / 2)
    }

    /// Bottom-right cell.
    #[must_use]
    pub const fn max(&self) -> Vector2i {
        Vector2i::new(self.width - 1, self.height - 1)
    }

    /// Reports whether `point` lies inside the grid.
    #[must_use]
    pub fn contains(&self, point: Vector2i) -> bool {
        (0..self.width).contains(&point.x()) && (0..self.height).contains(&point.y())
    }
}

/// Strategy that computes obstacle cells for a grid.
///
/// Implementations may return duplicates; callers that need set semantics go
/// through [`PlacementChain::positions`].
pub trait ObstaclePlacement: fmt::Debug + Send + Sync {
    /// Computes the obstacle cells for a grid described by `metrics`.
    fn compute(&self, metrics: GridMetrics, rng: &mut dyn RngCore) -> Vec<Vector2i>;
}

/// Maps a coordinate expressed along the layout's primary (`a`) and secondary
/// (`b`) axes back into grid space.
const fn oriented(rotate: bool, a: i32, b: i32) -> Vector2i {
    if rotate {
        Vector2i::new(b, a)
    } else {
        Vector2i::new(a, b)
    }
}
