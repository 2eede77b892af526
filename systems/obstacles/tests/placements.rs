use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{spawn_position, Vector2i};
use snake_system_obstacles::{
    Cross, Dispersion, Enclosure, GridMetrics, ObstaclePlacement, PlacementChain, PlacementError,
    RandomLayout, Registry, Room, Separator, Walls,
};

const METRICS: GridMetrics = GridMetrics::new(21, 15);

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn enclosure_covers_the_border_once() {
    let positions = PlacementChain::single(Enclosure).positions(METRICS, &mut rng(0));
    assert_eq!(positions.len(), 2 * 21 + 2 * 15 - 4);
    assert!(positions
        .iter()
        .all(|p| p.x() == 0 || p.y() == 0 || p.x() == 20 || p.y() == 14));
}

#[test]
fn chains_union_without_duplicates() {
    let mut source = rng(1);
    let enclosure = PlacementChain::single(Enclosure).positions(METRICS, &mut source);
    let cross = PlacementChain::single(Cross).positions(METRICS, &mut source);
    let combined = PlacementChain::single(Enclosure)
        .then(Cross)
        .positions(METRICS, &mut source);

    let expected: BTreeSet<_> = enclosure.union(&cross).copied().collect();
    assert_eq!(combined, expected);
    assert!(combined.len() < enclosure.len() + cross.len());
}

#[test]
fn cross_arms_meet_the_edges() {
    let positions = PlacementChain::single(Cross).positions(METRICS, &mut rng(0));
    assert!(positions.contains(&Vector2i::new(0, 7)));
    assert!(positions.contains(&Vector2i::new(20, 7)));
    assert!(positions.contains(&Vector2i::new(10, 0)));
    assert!(positions.contains(&Vector2i::new(10, 14)));
    assert!(!positions.contains(&Vector2i::new(10, 7)));
}

#[test]
fn separator_spans_the_grid() {
    let horizontal = PlacementChain::single(Separator::new(false, false))
        .positions(METRICS, &mut rng(0));
    assert_eq!(horizontal.len(), 21);
    assert!(horizontal.iter().all(|p| p.y() == 3));

    let mirrored_vertical = PlacementChain::single(Separator::new(true, true))
        .positions(METRICS, &mut rng(0));
    assert_eq!(mirrored_vertical.len(), 15);
    assert!(mirrored_vertical.iter().all(|p| p.x() == 21 - 5 - 1));
}

#[test]
fn room_is_open_toward_one_edge() {
    let room = PlacementChain::single(Room::new(false, true)).positions(METRICS, &mut rng(0));
    // Mirrored room: the closed side sits low and the walls run up to row zero.
    assert!(room.contains(&Vector2i::new(6, 0)));
    assert!(room.contains(&Vector2i::new(14, 0)));
    assert!(room.contains(&Vector2i::new(10, 10)));
    assert!(!room.contains(&Vector2i::new(10, 0)));
}

#[test]
fn walls_hang_from_opposite_edges() {
    let walls = PlacementChain::single(Walls::new(false, false)).positions(METRICS, &mut rng(0));
    // Length along the rows is (14 / 3.5) truncated, plus the starting cell.
    assert!(walls.contains(&Vector2i::new(10, 0)));
    assert!(walls.contains(&Vector2i::new(10, 4)));
    assert!(!walls.contains(&Vector2i::new(10, 5)));
    assert!(walls.contains(&Vector2i::new(5, 14)));
    assert!(walls.contains(&Vector2i::new(15, 10)));
    assert_eq!(walls.len(), 5 + 2 * 5);
}

#[test]
fn every_layout_stays_inside_the_grid() {
    let registry = Registry::standard();
    for name in registry.names() {
        let chain = registry.resolve_chain(name).expect("registered");
        for seed in 0..5 {
            let positions = chain.positions(GridMetrics::new(9, 9), &mut rng(seed));
            assert!(
                positions
                    .iter()
                    .all(|p| (0..9).contains(&p.x()) && (0..9).contains(&p.y())),
                "{name} placed an obstacle outside a 9x9 grid"
            );
        }
    }
}

#[test]
fn dispersion_respects_the_safe_zone() {
    let dispersion = Dispersion::default();
    let safe_zone = dispersion.safe_zone(METRICS);
    let spawn = spawn_position(21, 15);
    assert!(safe_zone.contains(&spawn));
    assert!(safe_zone.contains(&Vector2i::new(spawn.x() - 1, spawn.y() - 2)));
    assert!(safe_zone.contains(&Vector2i::new(spawn.x() + 1, spawn.y() + 3)));
    assert_eq!(safe_zone.len(), 3 * 6);

    for seed in 0..32 {
        let positions = dispersion.compute(METRICS, &mut rng(seed));
        assert!(positions.iter().all(|p| !safe_zone.contains(p)));
    }
}

#[test]
fn dispersion_never_forms_blocks() {
    let positions: BTreeSet<_> = Dispersion::default()
        .compute(METRICS, &mut rng(7))
        .into_iter()
        .collect();
    assert!(!positions.is_empty());
    for position in &positions {
        assert!((1..20).contains(&position.x()) && (1..14).contains(&position.y()));
        for neighbour in [Vector2i::LEFT, Vector2i::UP, Vector2i::new(-1, -1)] {
            assert!(
                !positions.contains(&(*position + neighbour)),
                "{position:?} touches an earlier obstacle"
            );
        }
    }
}

#[test]
fn seeded_layouts_are_deterministic() {
    let layout = RandomLayout::default();
    let first = layout.compute(METRICS, &mut rng(42));
    let second = layout.compute(METRICS, &mut rng(42));
    assert_eq!(first, second);

    let dispersion = Dispersion::default();
    assert_eq!(
        dispersion.compute(METRICS, &mut rng(9)),
        dispersion.compute(METRICS, &mut rng(9))
    );
}

#[test]
fn random_layout_varies_between_draws() {
    let layout = RandomLayout::default();
    let mut source = rng(3);
    let draws: BTreeSet<Vec<Vector2i>> = (0..20)
        .map(|_| layout.compute(METRICS, &mut source))
        .collect();
    assert!(draws.len() > 1);
}

#[test]
fn registry_resolves_chains_and_rejects_unknown_names() {
    let registry = Registry::standard();
    let chain = registry.resolve_chain("enclosure:walls2").expect("known");
    assert_eq!(chain.len(), 2);

    assert_eq!(
        registry.resolve_chain("enclosure:spiral").err(),
        Some(PlacementError::UnknownName("spiral".to_owned()))
    );
    assert_eq!(
        registry.resolve_chain(" : ").err(),
        Some(PlacementError::EmptyChain)
    );
}

#[test]
fn registry_lists_names_sorted() {
    let registry = Registry::standard();
    let names = registry.names();
    assert_eq!(names.len(), 16);
    assert_eq!(names.first(), Some(&"corners"));
    assert_eq!(names.last(), Some(&"xmark"));
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}
