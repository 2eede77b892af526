use snake_core::{Event, Proportion, Range, Vector2i};
use snake_system_motor::{MotorError, MotorStep, SnakeMotor, MAX_MOVE_SKIPS};
use snake_world::{Grid, Snake};

fn speed_range(bottom: f32, top: f32) -> Range<Proportion> {
    Range::new(
        Proportion::new(bottom).expect("bottom"),
        Proportion::new(top).expect("top"),
    )
    .expect("range")
}

#[test]
fn starts_at_the_slowest_speed() {
    let motor = SnakeMotor::new(speed_range(0.4, 0.8)).expect("motor");
    assert_eq!(motor.speed(), Proportion::new(0.4).expect("speed"));
    assert_eq!(MAX_MOVE_SKIPS, 10);
    assert_eq!(motor.required_skips(), 6);
}

#[test]
fn seven_ticks_produce_exactly_one_move_at_slowest_speed() {
    let mut grid = Grid::new(21, 15).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(10, 7), 3, None).expect("snake");
    let mut motor = SnakeMotor::new(speed_range(0.4, 0.8)).expect("motor");
    let mut events: Vec<Event> = Vec::new();

    let steps: Vec<_> = (0..7)
        .map(|_| {
            motor
                .process(&snake, &mut grid, Vector2i::UP, &mut events)
                .expect("process")
        })
        .collect();

    assert_eq!(
        steps.iter().filter(|step| **step == MotorStep::Moved).count(),
        1
    );
    assert_eq!(steps.last(), Some(&MotorStep::Moved));
    let head = snake.head(&grid).expect("head").position();
    assert_eq!(head, Vector2i::new(10, 6));
    assert!(events.is_empty());
}

#[test]
fn full_speed_moves_every_tick() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 2, None).expect("snake");
    let mut motor = SnakeMotor::new(speed_range(0.5, 1.0)).expect("motor");
    motor.set_speed(Proportion::MAX).expect("in range");
    let mut events = Vec::new();

    for _ in 0..3 {
        assert_eq!(
            motor
                .process(&snake, &mut grid, Vector2i::RIGHT, &mut events)
                .expect("process"),
            MotorStep::Moved
        );
    }
    assert_eq!(
        snake.head(&grid).expect("head").position(),
        Vector2i::new(7, 4)
    );
}

#[test]
fn speed_outside_range_is_rejected() {
    let mut motor = SnakeMotor::new(speed_range(0.4, 0.8)).expect("motor");
    let result = motor.set_speed(Proportion::new(0.9).expect("speed"));
    assert!(matches!(result, Err(MotorError::SpeedOutOfRange { .. })));
    assert_eq!(motor.speed(), Proportion::new(0.4).expect("speed"));
}
