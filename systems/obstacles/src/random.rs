//! Layout picked at random from a fixed catalog on every computation.

use rand::{Rng, RngCore};
use snake_core::Vector2i;
use tracing::debug;

use crate::{
    Corners, Cross, Enclosure, GridMetrics, ObstaclePlacement, PlacementChain, Quads, Room,
    Separator, Walls, XMark,
};

/// Chooses one catalog entry uniformly each time cells are computed, so
/// repeated computations may produce different layouts.
#[derive(Debug)]
pub struct RandomLayout {
    catalog: Vec<PlacementChain>,
}

impl RandomLayout {
    /// Creates a random layout drawing from the provided catalog.
    #[must_use]
    pub fn with_catalog(catalog: Vec<PlacementChain>) -> Self {
        Self { catalog }
    }

    /// Entries the layout chooses between.
    #[must_use]
    pub fn catalog(&self) -> &[PlacementChain] {
        &self.catalog
    }
}

impl Default for RandomLayout {
    fn default() -> Self {
        let orientations = [(true, false), (true, true), (false, true)];

        let mut catalog = vec![
            PlacementChain::single(Enclosure),
            PlacementChain::single(Quads),
            PlacementChain::single(Corners),
            PlacementChain::single(Cross),
            PlacementChain::single(XMark),
        ];
        for (rotate, mirror) in orientations {
            catalog.push(PlacementChain::single(Room::new(rotate, mirror)));
        }
        for (rotate, mirror) in orientations {
            catalog.push(PlacementChain::single(Walls::new(rotate, mirror)));
        }
        for (rotate, mirror) in orientations {
            catalog.push(PlacementChain::single(Separator::new(rotate, mirror)));
        }
        catalog.extend([
            PlacementChain::single(Enclosure).then(Cross),
            PlacementChain::single(Quads).then(Cross),
            PlacementChain::single(Corners).then(Cross),
            PlacementChain::single(XMark).then(Cross),
        ]);
        for (rotate, mirror) in orientations {
            catalog.push(PlacementChain::single(Enclosure).then(Walls::new(rotate, mirror)));
        }

        Self { catalog }
    }
}

impl ObstaclePlacement for RandomLayout {
    fn compute(&self, metrics: GridMetrics, rng: &mut dyn RngCore) -> Vec<Vector2i> {
        if self.catalog.is_empty() {
            return Vec::new();
        }
        let index = rng.gen_range(0..self.catalog.len());
        debug!(index, layout = ?self.catalog[index], "random obstacle layout chosen");
        self.catalog[index].compute(metrics, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_every_variant() {
        let layout = RandomLayout::default();
        assert_eq!(layout.catalog().len(), 21);
        assert_eq!(
            layout
                .catalog()
                .iter()
                .filter(|entry| entry.len() == 2)
                .count(),
            7
        );
    }
}
