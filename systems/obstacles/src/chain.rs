//! Ordered composition of layouts.

use std::collections::BTreeSet;

use rand::RngCore;
use snake_core::Vector2i;

use crate::{GridMetrics, ObstaclePlacement};

/// Fixed list of layouts whose cells are unioned.
#[derive(Debug, Default)]
pub struct PlacementChain {
    links: Vec<Box<dyn ObstaclePlacement>>,
}

impl PlacementChain {
    /// Creates an empty chain that places nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain holding a single layout.
    #[must_use]
    pub fn single(link: impl ObstaclePlacement + 'static) -> Self {
        Self::new().then(link)
    }

    /// Appends `link` to the end of the chain.
    #[must_use]
    pub fn then(mut self, link: impl ObstaclePlacement + 'static) -> Self {
        self.push(Box::new(link));
        self
    }

    /// Appends an already boxed layout.
    pub fn push(&mut self, link: Box<dyn ObstaclePlacement>) {
        self.links.push(link);
    }

    /// Number of layouts in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Reports whether the chain holds no layouts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Deduplicated union of every link's cells, restricted to the grid.
    #[must_use]
    pub fn positions(&self, metrics: GridMetrics, rng: &mut dyn RngCore) -> BTreeSet<Vector2i> {
        self.links
            .iter()
            .flat_map(|link| link.compute(metrics, rng))
            .filter(|position| metrics.contains(*position))
            .collect()
    }
}

impl ObstaclePlacement for PlacementChain {
    fn compute(&self, metrics: GridMetrics, rng: &mut dyn RngCore) -> Vec<Vector2i> {
        self.positions(metrics, rng).into_iter().collect()
    }
}
