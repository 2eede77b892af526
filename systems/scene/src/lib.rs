#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven snake scene.
//!
//! [`Grassland`] is the single-threaded simulation: a grid, the snake, its
//! motor and the food pellet. [`Scene`] advances a grassland on a background
//! worker at a fixed wall-clock cadence and exposes pausing, steering and
//! cancellation through a cloneable [`Controller`].

mod grassland;
mod scene;

use snake_core::{Proportion, Range, ValueError, Vector2i, DEFAULT_INITIAL_GROWTH, DEFAULT_SPEED_RANGE};
use snake_system_motor::MotorError;
use snake_world::WorldError;
use thiserror::Error;

pub use grassland::Grassland;
pub use scene::{Controller, Notice, Scene};

/// Ticks per second used unless configured otherwise.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Growth at which the snake reaches the top of its speed range, unless
/// configured otherwise.
pub const DEFAULT_GROWTH_FOR_MAX_SPEED: usize = 50;

/// Failures raised while building or running a scene.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SceneError {
    /// The scene was configured with zero ticks per second.
    #[error("tick rate must be greater than zero")]
    InvalidTickRate,
    /// The scene was used after being disposed.
    #[error("the scene has been disposed")]
    Disposed,
    /// The scene worker was started twice.
    #[error("the scene is already running")]
    AlreadyRunning,
    /// The scene was awaited before being started.
    #[error("the scene has not been started")]
    NotRunning,
    /// The scene was terminated before reaching a conclusion.
    #[error("the scene was cancelled")]
    Cancelled,
    /// The worker thread could not be spawned.
    #[error("{0}")]
    Worker(String),
    /// The worker thread panicked.
    #[error("scene worker panicked: {0}")]
    Panicked(String),
    /// Shared scene state was poisoned by a panicking thread.
    #[error("scene state lock was poisoned")]
    Poisoned,
    /// No free cell remained to place food on.
    #[error("no free cell is left to place food on")]
    NoFreeCell,
    /// The grid rejected an operation.
    #[error(transparent)]
    World(#[from] WorldError),
    /// The motor rejected an operation.
    #[error(transparent)]
    Motor(#[from] MotorError),
    /// A numeric value was out of bounds.
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Parameters of a scene, already validated by the caller where noted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    /// Ticks per second; must be greater than zero.
    pub tick_rate: u32,
    /// Bounds of the snake's speed; the bottom must be greater than zero.
    pub speed_range: Range<Proportion>,
    /// Growth at which the speed reaches the top of its range; `None` keeps
    /// the speed constant.
    pub growth_for_max_speed: Option<usize>,
    /// Length of the freshly spawned snake.
    pub initial_growth: usize,
    /// Length at which the snake is satisfied; `None` never satisfies it.
    pub final_growth: Option<usize>,
    /// Seed for food placement; `None` seeds from system entropy.
    pub rng_seed: Option<u64>,
    /// Head position of the freshly spawned snake; `None` uses the grid's
    /// standard spawn point.
    pub spawn: Option<Vector2i>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            speed_range: DEFAULT_SPEED_RANGE,
            growth_for_max_speed: Some(DEFAULT_GROWTH_FOR_MAX_SPEED),
            initial_growth: DEFAULT_INITIAL_GROWTH,
            final_growth: None,
            rng_seed: None,
            spawn: None,
        }
    }
}
