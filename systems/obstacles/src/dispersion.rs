//! Random scatter of single-cell obstacles.

use std::collections::BTreeSet;

use rand::{Rng, RngCore};
use snake_core::{spawn_position, Vector2i, DEFAULT_INITIAL_GROWTH};

use crate::{GridMetrics, ObstaclePlacement};

/// Probability that an eligible cell receives an obstacle.
const DENSITY: f64 = 0.2;

/// Scatters obstacles over the interior of the grid.
///
/// Cells around the spawn point are reserved so the snake never starts inside
/// an obstacle, and no obstacle is placed next to one chosen earlier on its
/// left, above it, or diagonally above-left, which keeps solid blocks from
/// forming.
#[derive(Clone, Copy, Debug)]
pub struct Dispersion {
    initial_growth: usize,
}

impl Dispersion {
    /// Creates a scatter that keeps clear of a snake spawned with `initial_growth` units.
    #[must_use]
    pub const fn new(initial_growth: usize) -> Self {
        Self { initial_growth }
    }

    /// Cells kept free around the spawn point: three columns wide, from two
    /// rows above the head down past the initial tail.
    #[must_use]
    pub fn safe_zone(&self, metrics: GridMetrics) -> BTreeSet<Vector2i> {
        let spawn = spawn_position(metrics.width(), metrics.height());
        let below = i32::try_from(self.initial_growth).unwrap_or(i32::MAX);

        let mut column = vec![
            Vector2i::new(spawn.x(), spawn.y() - 1),
            Vector2i::new(spawn.x(), spawn.y() - 2),
        ];
        column.extend((0..=below).map(|i| Vector2i::new(spawn.x(), spawn.y().saturating_add(i))));

        [Vector2i::LEFT, Vector2i::ZERO, Vector2i::RIGHT]
            .into_iter()
            .flat_map(|shift| column.iter().map(move |position| *position + shift))
            .collect()
    }
}

impl Default for Dispersion {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_GROWTH)
    }
}

impl ObstaclePlacement for Dispersion {
    fn compute(&self, metrics: GridMetrics, rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let safe_zone = self.safe_zone(metrics);
        let max = metrics.max();
        let mut chosen = BTreeSet::new();

        for x in 1..max.x() {
            for y in 1..max.y() {
                let position = Vector2i::new(x, y);
                if safe_zone.contains(&position) {
                    continue;
                }
                let crowded = [
                    Vector2i::new(x - 1, y),
                    Vector2i::new(x - 1, y - 1),
                    Vector2i::new(x, y - 1),
                ]
                .iter()
                .any(|neighbour| chosen.contains(neighbour));
                if crowded {
                    continue;
                }
                if rng.gen_bool(DENSITY) {
                    let _ = chosen.insert(position);
                }
            }
        }

        chosen.into_iter().collect()
    }
}
