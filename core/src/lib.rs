#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the snake simulation.
//!
//! This crate defines the value types and the message surface that connect
//! the authoritative world, the systems that drive it, and the adapters that
//! present it. World mutations broadcast [`Event`] values into caller-owned
//! buffers; the scene reacts to those events and eventually reports an
//! [`Outcome`].

mod numerics;

pub use numerics::{Proportion, Range, ValueError, Vector2i, DEFAULT_SPEED_RANGE};

/// Smallest permitted snake length: a head plus one tail unit.
pub const MIN_GROWTH: usize = 2;

/// Length of a freshly spawned snake unless configured otherwise.
pub const DEFAULT_INITIAL_GROWTH: usize = 3;

/// Tag carried by the snake's leading unit.
pub const HEAD_TAG: &str = "head";

/// Tag applied to whatever unit the snake crashed into.
pub const CRASH_TAG: &str = "crash";

/// Cell where the snake's head is placed on a grid of the given size.
#[must_use]
pub const fn spawn_position(width: i32, height: i32) -> Vector2i {
    Vector2i::new(width / 2, height / 2)
}

/// Logical movement directions on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit step vector associated with the direction.
    #[must_use]
    pub const fn vector(self) -> Vector2i {
        match self {
            Self::Up => Vector2i::UP,
            Self::Down => Vector2i::DOWN,
            Self::Left => Vector2i::LEFT,
            Self::Right => Vector2i::RIGHT,
        }
    }

    /// Resolves a unit step vector back into a direction.
    #[must_use]
    pub fn from_vector(vector: Vector2i) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.vector() == vector)
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Tag marking a tail unit that points in this direction.
    #[must_use]
    pub const fn tail_tag(self) -> &'static str {
        match self {
            Self::Up => "tail-up",
            Self::Down => "tail-down",
            Self::Left => "tail-left",
            Self::Right => "tail-right",
        }
    }

    /// Resolves a tail tag back into the direction it encodes.
    #[must_use]
    pub fn from_tail_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.tail_tag() == tag)
    }
}

/// Categories of occupants a grid cell may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Part of the snake's body.
    Snake,
    /// A food pellet the snake can eat.
    Food,
    /// A static obstacle.
    Obstacle,
}

/// Identifier allocated to an entity when it is registered with a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Events broadcast by the world while mutating the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The snake ate a food unit and grew by one.
    AteFood {
        /// Whether the snake reached its final growth with this meal.
        satisfied: bool,
    },
    /// The snake attempted to move into an occupied, inedible cell.
    Crashed {
        /// Cell of the unit that received the crash tag.
        at: Vector2i,
    },
    /// An entity lost its last unit and was removed from the grid.
    EntityCleared {
        /// Identifier of the removed entity.
        entity: EntityId,
    },
}

/// Terminal state reached by a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Conclusion {
    /// The snake reached its final growth.
    Satisfied,
    /// The snake crashed into something.
    Crashed,
}

/// Result reported once a scene concludes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// How the scene ended.
    pub conclusion: Conclusion,
    /// Snake length at the moment the scene concluded.
    pub growth: usize,
    /// Snake length when the scene started.
    pub initial_growth: usize,
}

impl Outcome {
    /// Reports whether the outcome counts as a win.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.conclusion == Conclusion::Satisfied
    }

    /// Number of units gained during the scene.
    #[must_use]
    pub fn score(&self) -> usize {
        self.growth.saturating_sub(self.initial_growth)
    }
}
