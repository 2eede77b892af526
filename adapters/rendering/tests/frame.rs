use std::time::{Duration, Instant};

use snake_core::{UnitKind, Vector2i};
use snake_rendering::{
    format_elapsed, glyph_of, Frame, InfoPanel, Palette, PlayClock, RenderingError, SnakeColor,
    Style,
};
use snake_world::{Entity, Grid, Snake};

#[test]
fn text_frame_draws_border_and_glyphs() {
    let mut grid = Grid::new(3, 3).expect("grid");
    let _ = Snake::spawn(&mut grid, Vector2i::new(1, 0), 2, None).expect("snake");
    let _ = grid.add_entity(Entity::new(UnitKind::Food, [Vector2i::new(0, 2)]));
    let _ = grid.add_entity(Entity::new(UnitKind::Obstacle, [Vector2i::new(2, 2)]));

    let frame = Frame::capture(&grid)
        .expect("frame")
        .with_info(vec!["Growth: 2".to_owned()]);

    assert_eq!(
        frame.text_lines(),
        vec![
            "╔═══════╗",
            "║ · ■ · ║",
            "║ · ▼ · ║",
            "║ @ · # ║",
            "╚═══════╝",
            "Growth: 2",
        ]
    );
    assert_eq!(frame.line_width(), 9);
    assert_eq!(frame.to_string().lines().count(), 6);
}

#[test]
fn tail_glyph_follows_the_tail_tag() {
    let mut grid = Grid::new(9, 9).expect("grid");
    let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 3, None).expect("snake");
    let mut events = Vec::new();
    for _ in 0..3 {
        snake
            .step(&mut grid, Vector2i::RIGHT, &mut events)
            .expect("step");
    }

    let tail = grid
        .entity(snake.entity())
        .expect("snake")
        .units()
        .last()
        .cloned()
        .expect("tail");
    assert_eq!(tail.position(), Vector2i::new(5, 4));
    assert_eq!(glyph_of(&tail), '◄');
    assert_eq!(Style::of(&tail), Style::Body);
}

#[test]
fn info_panel_wraps_items() {
    let mut panel = InfoPanel::new();
    panel.set("Time", format_elapsed(Duration::from_secs(187)));
    panel.set("Growth", "5/315");

    assert_eq!(
        panel.lines(40).expect("lines"),
        vec!["Time: 03:07   Growth: 5/315".to_owned()]
    );
    assert_eq!(
        panel.lines(15).expect("lines"),
        vec!["Time: 03:07".to_owned(), "Growth: 5/315".to_owned()]
    );

    panel.set("Growth", "6/315");
    assert_eq!(
        panel.lines(40).expect("lines"),
        vec!["Time: 03:07   Growth: 6/315".to_owned()]
    );
    assert_eq!(
        panel.lines(0),
        Err(RenderingError::InvalidLineLength { max_line_length: 0 })
    );
}

#[test]
fn play_clock_stands_still_while_paused() {
    let start = Instant::now();
    let mut clock = PlayClock::started_at(start);

    clock.set_paused(true, start + Duration::from_secs(10));
    assert!(!clock.is_running());
    assert_eq!(
        clock.elapsed(start + Duration::from_secs(60)),
        Duration::from_secs(10)
    );

    clock.set_paused(false, start + Duration::from_secs(60));
    clock.set_paused(false, start + Duration::from_secs(61));
    assert_eq!(
        clock.elapsed(start + Duration::from_secs(65)),
        Duration::from_secs(15)
    );
}

#[test]
fn palettes_distinguish_every_style() {
    let palette = Palette::for_snake(SnakeColor::Yellow);
    assert_ne!(palette.color(Style::Head), palette.color(Style::Body));
    assert_ne!(palette.color(Style::Crash), palette.color(Style::Obstacle));
    assert_eq!(Palette::default(), Palette::for_snake(SnakeColor::Green));
}
