//! Layouts that can be rotated a quarter turn and mirrored.
//!
//! Each layout is described along a primary axis `a` (columns unless rotated)
//! and a secondary axis `b`; mirroring flips the layout along `b`.

use rand::RngCore;
use snake_core::Vector2i;

use crate::{oriented, GridMetrics, ObstaclePlacement};

fn axes(metrics: GridMetrics, rotate: bool) -> (i32, i32) {
    let max = metrics.max();
    if rotate {
        (max.y(), max.x())
    } else {
        (max.x(), max.y())
    }
}

/// Three-sided room open toward one edge.
#[derive(Clone, Copy, Debug)]
pub struct Room {
    rotate: bool,
    mirror: bool,
}

impl Room {
    /// Creates a room with the provided orientation.
    #[must_use]
    pub const fn new(rotate: bool, mirror: bool) -> Self {
        Self { rotate, mirror }
    }
}

impl ObstaclePlacement for Room {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let (max_a, max_b) = axes(metrics, self.rotate);
        let mut start = max_b / 3;
        if self.mirror {
            start = max_b - start;
        }
        let first_a = max_a / 3;
        let last_a = max_a - first_a;

        let mut positions: Vec<_> = (first_a..=last_a)
            .map(|a| oriented(self.rotate, a, start))
            .collect();

        let (first_b, last_b) = if self.mirror {
            (0, start)
        } else {
            (start, max_b)
        };
        for b in first_b..=last_b {
            positions.push(oriented(self.rotate, first_a, b));
            positions.push(oriented(self.rotate, last_a, b));
        }
        positions
    }
}

/// One wall hanging from one edge and two walls rising from the other.
#[derive(Clone, Copy, Debug)]
pub struct Walls {
    rotate: bool,
    mirror: bool,
}

impl Walls {
    /// Creates the walls with the provided orientation.
    #[must_use]
    pub const fn new(rotate: bool, mirror: bool) -> Self {
        Self { rotate, mirror }
    }
}

impl ObstaclePlacement for Walls {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let (max_a, max_b) = axes(metrics, self.rotate);
        let wall_len = (max_b as f32 / 3.5) as i32;
        let near = 0..=wall_len;
        let far = max_b - wall_len..=max_b;

        let (single, pair) = if self.mirror {
            (far, near)
        } else {
            (near, far)
        };

        let mut positions: Vec<_> = single
            .map(|b| oriented(self.rotate, max_a / 2, b))
            .collect();

        let a1 = max_a / 4;
        let a2 = max_a - a1;
        for b in pair {
            positions.push(oriented(self.rotate, a1, b));
            positions.push(oriented(self.rotate, a2, b));
        }
        positions
    }
}

/// A full-length line cutting off a quarter of the grid.
#[derive(Clone, Copy, Debug)]
pub struct Separator {
    rotate: bool,
    mirror: bool,
}

impl Separator {
    /// Creates a separator with the provided orientation.
    #[must_use]
    pub const fn new(rotate: bool, mirror: bool) -> Self {
        Self { rotate, mirror }
    }
}

impl ObstaclePlacement for Separator {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let (length, across) = if self.rotate {
            (metrics.height(), metrics.width())
        } else {
            (metrics.width(), metrics.height())
        };
        let mut offset = across / 4;
        if self.mirror {
            offset = across - offset - 1;
        }
        (0..length)
            .map(|i| oriented(self.rotate, i, offset))
            .collect()
    }
}
