use snake_core::{Direction, Event, UnitKind, Vector2i, CRASH_TAG, HEAD_TAG};
use snake_world::{Entity, Grid, Snake, Unit, WorldError};

fn body(grid: &Grid, snake: &Snake) -> Vec<Vector2i> {
    grid.entity(snake.entity())
        .expect("snake registered")
        .iter()
        .map(Unit::position)
        .collect()
}

fn assert_tags_consistent(grid: &Grid, snake: &Snake) {
    let entity = grid.entity(snake.entity()).expect("snake registered");
    let heads = entity.iter().filter(|unit| unit.has_tag(HEAD_TAG)).count();
    let tails = entity
        .iter()
        .filter(|unit| unit.tail_direction().is_some())
        .count();
    assert_eq!(heads, 1, "expected exactly one head");
    assert_eq!(tails, 1, "expected exactly one tail");
    assert!(entity.units()[0].has_tag(HEAD_TAG));
    assert!(entity.units()[entity.len() - 1].tail_direction().is_some());
}

#[test]
fn spawn_lays_body_below_head() {
    let mut grid = Grid::new(21, 15).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(10, 7), 3, None).expect("snake");

    assert_eq!(
        body(&grid, &snake),
        vec![Vector2i::new(10, 7), Vector2i::new(10, 8), Vector2i::new(10, 9)]
    );
    assert_eq!(snake.growth(&grid), 3);
    assert_tags_consistent(&grid, &snake);
    let tail = grid
        .lookup(Vector2i::new(10, 9))
        .expect("in bounds")
        .expect("tail");
    assert_eq!(tail.tail_direction(), Some(Direction::Down));
}

#[test]
fn spawn_over_occupied_cells_is_rejected() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let _ = grid.add_entity(Entity::new(UnitKind::Obstacle, [Vector2i::new(4, 6)]));
    assert_eq!(
        Snake::spawn(&mut grid, Vector2i::new(4, 4), 3, None).err(),
        Some(WorldError::SpawnBlocked(Vector2i::new(4, 6)))
    );

    let mut short = Grid::new(9, 2).expect("grid");
    assert_eq!(
        Snake::spawn(&mut short, Vector2i::new(4, 0), 3, None).err(),
        Some(WorldError::SpawnBlocked(Vector2i::new(4, 0)))
    );
    assert_eq!(grid.entities().count(), 1);
    assert_eq!(short.entities().count(), 0);
}

#[test]
fn rejects_invalid_growth_limits() {
    let mut grid = Grid::new(9, 9).expect("grid");
    assert_eq!(
        Snake::spawn(&mut grid, Vector2i::new(4, 4), 1, None).err(),
        Some(WorldError::GrowthTooSmall { requested: 1 })
    );
    assert_eq!(
        Snake::spawn(&mut grid, Vector2i::new(4, 4), 3, Some(3)).err(),
        Some(WorldError::FinalGrowthTooSmall {
            initial: 3,
            final_growth: 3
        })
    );
    assert_eq!(grid.entities().count(), 0);
}

#[test]
fn eating_food_grows_behind_the_head() {
    let mut grid = Grid::new(21, 15).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(10, 7), 3, None).expect("snake");
    let food = grid.add_entity(Entity::new(UnitKind::Food, [Vector2i::new(10, 6)]));
    let mut events = Vec::new();

    snake
        .step(&mut grid, Vector2i::UP, &mut events)
        .expect("step");

    assert_eq!(snake.growth(&grid), 4);
    assert_eq!(snake.score(&grid), 1);
    assert_eq!(
        body(&grid, &snake),
        vec![
            Vector2i::new(10, 6),
            Vector2i::new(10, 7),
            Vector2i::new(10, 8),
            Vector2i::new(10, 9),
        ]
    );
    assert!(grid.entity(food).is_none(), "food entity should be cleared");
    assert_eq!(
        events,
        vec![
            Event::EntityCleared { entity: food },
            Event::AteFood { satisfied: false },
        ]
    );
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::Crashed { .. })));
    assert_tags_consistent(&grid, &snake);
}

#[test]
fn crashing_keeps_the_body_intact() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 2, None).expect("snake");
    let _ = grid.add_entity(Entity::new(UnitKind::Obstacle, [Vector2i::new(4, 3)]));
    let before = body(&grid, &snake);
    let mut events = Vec::new();

    snake
        .step(&mut grid, Vector2i::UP, &mut events)
        .expect("step");

    assert_eq!(events, vec![Event::Crashed { at: Vector2i::new(4, 3) }]);
    assert_eq!(snake.growth(&grid), 2);
    assert_eq!(body(&grid, &snake), before);
    let obstacle = grid
        .lookup(Vector2i::new(4, 3))
        .expect("in bounds")
        .expect("obstacle");
    assert!(obstacle.has_tag(CRASH_TAG));
}

#[test]
fn moving_into_own_body_is_a_crash() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 3, None).expect("snake");
    let mut events = Vec::new();

    snake
        .step(&mut grid, Vector2i::DOWN, &mut events)
        .expect("step");

    assert_eq!(events, vec![Event::Crashed { at: Vector2i::new(4, 5) }]);
    assert_eq!(snake.growth(&grid), 3);
}

#[test]
fn satisfaction_is_reported_on_reaching_final_growth() {
    let mut grid = Grid::new(21, 15).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(10, 7), 3, Some(5)).expect("snake");
    let mut events = Vec::new();

    let _ = grid.add_entity(Entity::new(UnitKind::Food, [Vector2i::new(10, 6)]));
    snake
        .step(&mut grid, Vector2i::UP, &mut events)
        .expect("first meal");
    assert!(events.contains(&Event::AteFood { satisfied: false }));

    events.clear();
    let _ = grid.add_entity(Entity::new(UnitKind::Food, [Vector2i::new(10, 5)]));
    snake
        .step(&mut grid, Vector2i::UP, &mut events)
        .expect("second meal");
    assert!(events.contains(&Event::AteFood { satisfied: true }));
    assert_eq!(snake.growth(&grid), 5);
}

#[test]
fn free_moves_keep_length_and_recompute_tail() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 3, None).expect("snake");
    let mut events = Vec::new();

    snake
        .step(&mut grid, Vector2i::LEFT, &mut events)
        .expect("left");
    assert_eq!(
        body(&grid, &snake),
        vec![Vector2i::new(3, 4), Vector2i::new(4, 4), Vector2i::new(4, 5)]
    );
    assert_tags_consistent(&grid, &snake);

    snake
        .step(&mut grid, Vector2i::LEFT, &mut events)
        .expect("left again");
    assert_eq!(
        body(&grid, &snake),
        vec![Vector2i::new(2, 4), Vector2i::new(3, 4), Vector2i::new(4, 4)]
    );
    let tail = grid
        .lookup(Vector2i::new(4, 4))
        .expect("in bounds")
        .expect("tail");
    assert_eq!(tail.tail_direction(), Some(Direction::Right));
    assert!(events.is_empty());
    assert_eq!(snake.growth(&grid), 3);
}

#[test]
fn tail_direction_flips_across_the_wrap_edge() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(0, 4), 2, None).expect("snake");
    let mut events = Vec::new();

    snake
        .step(&mut grid, Vector2i::LEFT, &mut events)
        .expect("wrap left");

    assert_eq!(
        body(&grid, &snake),
        vec![Vector2i::new(8, 4), Vector2i::new(0, 4)]
    );
    let tail = grid
        .lookup(Vector2i::new(0, 4))
        .expect("in bounds")
        .expect("tail");
    assert_eq!(tail.tail_direction(), Some(Direction::Right));
}

#[test]
fn move_onto_requires_an_occupant() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 2, None).expect("snake");
    let mut events = Vec::new();
    assert_eq!(
        snake.move_onto(&mut grid, Vector2i::new(0, 0), &mut events),
        Err(WorldError::EmptyTarget(Vector2i::new(0, 0)))
    );
}
