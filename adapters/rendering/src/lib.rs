#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering contracts for snake adapters.

mod panel;

use anyhow::Result as AnyResult;
use snake_core::{Direction, UnitKind, Vector2i, CRASH_TAG, HEAD_TAG};
use snake_world::{GridQuery, Unit, WorldError};
use std::{error::Error, fmt, str::FromStr};

pub use panel::{format_elapsed, InfoPanel, PlayClock};

/// Glyph drawn for cells without an occupant.
pub const VOID_GLYPH: char = '·';

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Channels quantised to bytes, ignoring alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (
            quantise_channel(self.red),
            quantise_channel(self.green),
            quantise_channel(self.blue),
        )
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn quantise_channel(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Visual class of a rendered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// Empty cell.
    Void,
    /// Leading unit of the snake.
    Head,
    /// Any other unit of the snake.
    Body,
    /// Food pellet.
    Food,
    /// Static obstacle.
    Obstacle,
    /// Unit the snake crashed into.
    Crash,
}

impl Style {
    /// Style applied to `unit`; the crash marker overrides every other rule.
    #[must_use]
    pub fn of(unit: &Unit) -> Self {
        if unit.has_tag(CRASH_TAG) {
            return Self::Crash;
        }
        match unit.kind() {
            UnitKind::Obstacle => Self::Obstacle,
            UnitKind::Food => Self::Food,
            UnitKind::Snake if unit.has_tag(HEAD_TAG) => Self::Head,
            UnitKind::Snake => Self::Body,
        }
    }
}

/// Glyph drawn for `unit`.
#[must_use]
pub fn glyph_of(unit: &Unit) -> char {
    match unit.kind() {
        UnitKind::Obstacle => '#',
        UnitKind::Food => '@',
        UnitKind::Snake => match unit.tail_direction() {
            Some(Direction::Up) => '▲',
            Some(Direction::Down) => '▼',
            Some(Direction::Left) => '◄',
            Some(Direction::Right) => '►',
            None => '■',
        },
    }
}

/// Color scheme of the snake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnakeColor {
    /// Green snake.
    #[default]
    Green,
    /// Cyan snake.
    Cyan,
    /// Yellow snake.
    Yellow,
}

impl FromStr for SnakeColor {
    type Err = RenderingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "cyan" => Ok(Self::Cyan),
            "yellow" => Ok(Self::Yellow),
            _ => Err(RenderingError::UnknownSnakeColor {
                name: value.to_owned(),
            }),
        }
    }
}

/// Colors assigned to every [`Style`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Color of the snake's head.
    pub head: Color,
    /// Color of the snake's body.
    pub body: Color,
    /// Color of food pellets.
    pub food: Color,
    /// Color of obstacles.
    pub obstacle: Color,
    /// Color of the unit the snake crashed into.
    pub crash: Color,
    /// Color of empty cells.
    pub void: Color,
}

impl Palette {
    /// Palette drawing the snake in the requested color.
    #[must_use]
    pub fn for_snake(snake: SnakeColor) -> Self {
        let head = match snake {
            SnakeColor::Green => Color::from_rgb_u8(0, 128, 0),
            SnakeColor::Cyan => Color::from_rgb_u8(0, 128, 128),
            SnakeColor::Yellow => Color::from_rgb_u8(128, 128, 0),
        };
        Self {
            head,
            body: head.lighten(0.5),
            food: Color::from_rgb_u8(255, 0, 255),
            obstacle: Color::from_rgb_u8(0, 0, 139),
            crash: Color::from_rgb_u8(255, 0, 0),
            void: Color::from_rgb_u8(128, 128, 128),
        }
    }

    /// Color used for `style`.
    #[must_use]
    pub const fn color(&self, style: Style) -> Color {
        match style {
            Style::Void => self.void,
            Style::Head => self.head,
            Style::Body => self.body,
            Style::Food => self.food,
            Style::Obstacle => self.obstacle,
            Style::Crash => self.crash,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_snake(SnakeColor::default())
    }
}

/// One rendered grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Character drawn for the cell.
    pub glyph: char,
    /// Visual class of the cell.
    pub style: Style,
}

impl Cell {
    const VOID: Self = Self {
        glyph: VOID_GLYPH,
        style: Style::Void,
    };

    fn of(unit: Option<&Unit>) -> Self {
        unit.map_or(Self::VOID, |unit| Self {
            glyph: glyph_of(unit),
            style: Style::of(unit),
        })
    }
}

/// Snapshot of the grid and the info panel ready to be presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<Cell>>,
    info: Vec<String>,
}

impl Frame {
    /// Captures every cell of `grid`.
    pub fn capture<G>(grid: &G) -> Result<Self, RenderingError>
    where
        G: GridQuery + ?Sized,
    {
        let mut rows = Vec::with_capacity(usize::try_from(grid.height()).unwrap_or(0));
        for y in 0..grid.height() {
            let mut row = Vec::with_capacity(usize::try_from(grid.width()).unwrap_or(0));
            for x in 0..grid.width() {
                let unit = grid.lookup(Vector2i::new(x, y))?;
                row.push(Cell::of(unit));
            }
            rows.push(row);
        }
        Ok(Self {
            rows,
            info: Vec::new(),
        })
    }

    /// Attaches info panel lines shown below the grid.
    #[must_use]
    pub fn with_info(mut self, info: Vec<String>) -> Self {
        self.info = info;
        self
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Rows of cells from top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at column `x` and row `y`.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Info panel lines.
    #[must_use]
    pub fn info(&self) -> &[String] {
        &self.info
    }

    /// Number of characters in a bordered line, which is also the widest
    /// line the info panel may use.
    #[must_use]
    pub fn line_width(&self) -> usize {
        self.width() * 2 + 3
    }

    /// Top border line.
    #[must_use]
    pub fn upper_border(&self) -> String {
        format!("╔{}╗", "═".repeat(self.width() * 2 + 1))
    }

    /// Bottom border line.
    #[must_use]
    pub fn lower_border(&self) -> String {
        format!("╚{}╝", "═".repeat(self.width() * 2 + 1))
    }

    /// Plain text lines: the bordered grid followed by the info panel.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.height() + 2 + self.info.len());
        lines.push(self.upper_border());
        for row in &self.rows {
            let mut line = String::from("║ ");
            for cell in row {
                line.push(cell.glyph);
                line.push(' ');
            }
            line.push('║');
            lines.push(line);
        }
        lines.push(self.lower_border());
        lines.extend(self.info.iter().cloned());
        lines
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.text_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Rendering backend capable of presenting snake frames.
pub trait RenderingBackend {
    /// Presents `frame`, replacing whatever was shown before.
    fn present(&mut self, frame: &Frame, palette: &Palette) -> AnyResult<()>;
}

/// Errors that can occur when building frames.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Info panel lines must be at least one character wide.
    InvalidLineLength {
        /// Provided line length that failed validation.
        max_line_length: usize,
    },
    /// A snake color name did not match any scheme.
    UnknownSnakeColor {
        /// Name that failed to parse.
        name: String,
    },
    /// The grid rejected a lookup.
    Grid(WorldError),
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLineLength { max_line_length } => {
                write!(
                    f,
                    "line length must be greater than zero (received {max_line_length})"
                )
            }
            Self::UnknownSnakeColor { name } => {
                write!(f, "unknown snake color `{name}` (expected green, cyan or yellow)")
            }
            Self::Grid(error) => write!(f, "failed to read the grid: {error}"),
        }
    }
}

impl Error for RenderingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(error) => Some(error),
            _ => None,
        }
    }
}

impl From<WorldError> for RenderingError {
    fn from(error: WorldError) -> Self {
        Self::Grid(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_world::{Entity, Grid, Snake};

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 51, 0).lighten(0.2);
        assert_eq!(color.to_rgb_u8(), (51, 92, 51));
    }

    #[test]
    fn crash_style_takes_precedence() {
        let mut grid = Grid::new(9, 9).expect("grid");
        let snake = Snake::spawn(&mut grid, Vector2i::new(4, 4), 2, None).expect("snake");
        let _ = grid.add_entity(Entity::new(UnitKind::Obstacle, [Vector2i::new(4, 3)]));
        let mut events = Vec::new();
        snake
            .step(&mut grid, Vector2i::UP, &mut events)
            .expect("crash");

        let frame = Frame::capture(&grid).expect("frame");
        let crashed = frame.cell(4, 3).expect("cell");
        assert_eq!(crashed, Cell { glyph: '#', style: Style::Crash });
        assert_eq!(frame.cell(4, 4).map(|cell| cell.style), Some(Style::Head));
        assert_eq!(frame.cell(0, 0), Some(Cell::VOID));
    }

    #[test]
    fn snake_colors_parse_case_insensitively() {
        assert_eq!("Cyan".parse::<SnakeColor>(), Ok(SnakeColor::Cyan));
        assert!(matches!(
            "purple".parse::<SnakeColor>(),
            Err(RenderingError::UnknownSnakeColor { .. })
        ));
    }
}
