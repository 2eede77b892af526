//! Layouts that are symmetric about both grid axes.

use rand::RngCore;
use snake_core::Vector2i;

use crate::{GridMetrics, ObstaclePlacement};

/// Closes the whole border of the grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct Enclosure;

impl ObstaclePlacement for Enclosure {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let max = metrics.max();
        let mut positions = Vec::new();
        for x in 0..metrics.width() {
            positions.push(Vector2i::new(x, 0));
            positions.push(Vector2i::new(x, max.y()));
        }
        for y in 0..metrics.height() {
            positions.push(Vector2i::new(0, y));
            positions.push(Vector2i::new(max.x(), y));
        }
        positions
    }
}

/// Brackets each corner with walls a third of the side long.
#[derive(Clone, Copy, Debug, Default)]
pub struct Corners;

impl ObstaclePlacement for Corners {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let max = metrics.max();
        let mut positions = Vec::new();
        for x1 in 0..metrics.width() / 3 {
            let x2 = max.x() - x1;
            positions.extend([
                Vector2i::new(x1, 0),
                Vector2i::new(x1, max.y()),
                Vector2i::new(x2, 0),
                Vector2i::new(x2, max.y()),
            ]);
        }
        for y1 in 0..metrics.height() / 3 {
            let y2 = max.y() - y1;
            positions.extend([
                Vector2i::new(0, y1),
                Vector2i::new(max.x(), y1),
                Vector2i::new(0, y2),
                Vector2i::new(max.x(), y2),
            ]);
        }
        positions
    }
}

/// Four arms reaching from the middle of each edge toward the centre.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cross;

impl ObstaclePlacement for Cross {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let (mid, max) = (metrics.mid(), metrics.max());
        let mut positions = Vec::new();
        for x1 in 0..metrics.width() / 4 {
            positions.push(Vector2i::new(x1, mid.y()));
            positions.push(Vector2i::new(max.x() - x1, mid.y()));
        }
        for y1 in 0..metrics.height() / 4 {
            positions.push(Vector2i::new(mid.x(), y1));
            positions.push(Vector2i::new(mid.x(), max.y() - y1));
        }
        positions
    }
}

/// Four solid blocks, one per quadrant.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quads;

impl ObstaclePlacement for Quads {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let max = metrics.max();
        let start = metrics.mid() / 3;
        let end = start + metrics.mid() / 2;

        let mut positions = Vec::new();
        for x1 in start.x()..end.x() {
            let x2 = max.x() - x1;
            for y1 in start.y()..end.y() {
                let y2 = max.y() - y1;
                positions.extend([
                    Vector2i::new(x1, y1),
                    Vector2i::new(x1, y2),
                    Vector2i::new(x2, y1),
                    Vector2i::new(x2, y2),
                ]);
            }
        }
        positions
    }
}

/// Diagonal strokes growing inward from each corner.
#[derive(Clone, Copy, Debug, Default)]
pub struct XMark;

impl ObstaclePlacement for XMark {
    fn compute(&self, metrics: GridMetrics, _rng: &mut dyn RngCore) -> Vec<Vector2i> {
        let max = metrics.max();
        let reach = metrics.width().min(metrics.height()) / 3;

        let mut positions = Vec::new();
        let mut position = metrics.min();
        while position.x() < reach {
            positions.extend([
                position,
                Vector2i::new(max.x() - position.x(), position.y()),
                Vector2i::new(position.x(), max.y() - position.y()),
                max - position,
            ]);
            position = position + Vector2i::ONE;
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn quads_cover_a_block_per_quadrant() {
        let mut rng = StepRng::new(0, 0);
        let positions = Quads.compute(GridMetrics::new(21, 15), &mut rng);
        assert_eq!(positions.len(), 4 * 5 * 3);
        assert!(positions.contains(&Vector2i::new(3, 2)));
        assert!(positions.contains(&Vector2i::new(17, 12)));
        assert!(!positions.contains(&Vector2i::new(8, 2)));
    }

    #[test]
    fn xmark_reaches_a_third_of_the_short_side() {
        let mut rng = StepRng::new(0, 0);
        let positions = XMark.compute(GridMetrics::new(21, 15), &mut rng);
        assert_eq!(positions.len(), 4 * 5);
        assert!(positions.contains(&Vector2i::new(4, 4)));
        assert!(positions.contains(&Vector2i::new(16, 10)));
        assert!(!positions.contains(&Vector2i::new(5, 5)));
    }
}
