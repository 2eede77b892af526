#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative spatial state for the snake simulation.
//!
//! A [`Grid`] owns every registered [`Entity`]; entities own their [`Unit`]s.
//! The [`Snake`] is a handle to one of those entities and applies the
//! movement, eating and crashing rules through the grid, broadcasting
//! [`snake_core::Event`] values into caller-provided buffers.

mod entity;
mod grid;
mod snake;

use snake_core::{EntityId, Vector2i};
use thiserror::Error;

pub use entity::{Entity, Unit};
pub use grid::{Grid, GridQuery};
pub use snake::Snake;

/// Failures raised by grid and snake operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The grid was constructed with a non-positive dimension.
    #[error("grid dimensions must be greater than zero (got {width}x{height})")]
    InvalidDimensions {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
    },
    /// A step direction had both components set to zero.
    #[error("direction cannot be zero")]
    ZeroDirection,
    /// A step direction had a component outside `-1..=1`.
    #[error("direction components must be in range from -1 to 1 (got {0:?})")]
    DirectionOutOfRange(Vector2i),
    /// A point fell outside the grid.
    #[error("point {point:?} lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Offending point.
        point: Vector2i,
        /// Number of grid columns.
        width: i32,
        /// Number of grid rows.
        height: i32,
    },
    /// A snake was requested shorter than a head plus a tail.
    #[error("growth cannot be less than two (head and tail), got {requested}")]
    GrowthTooSmall {
        /// Requested or observed length.
        requested: usize,
    },
    /// A final growth did not exceed the initial growth.
    #[error("final growth {final_growth} must be greater than the initial growth {initial}")]
    FinalGrowthTooSmall {
        /// Initial length of the snake.
        initial: usize,
        /// Requested final length.
        final_growth: usize,
    },
    /// The snake would be spawned over an occupied cell or over itself.
    #[error("cannot spawn the snake over the occupied cell {0:?}")]
    SpawnBlocked(Vector2i),
    /// An entity identifier did not resolve to a registered entity.
    #[error("entity {} is not registered with the grid", .0.get())]
    MissingEntity(EntityId),
    /// A unit index did not resolve within its entity.
    #[error("entity {} has no unit at index {index}", .entity.get())]
    MissingUnit {
        /// Entity that was searched.
        entity: EntityId,
        /// Index that was requested.
        index: usize,
    },
    /// An occupant was expected at a cell that turned out to be empty.
    #[error("no unit occupies {0:?}")]
    EmptyTarget(Vector2i),
}
