//! Single-threaded simulation state advanced by the scene worker.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{
    spawn_position, Conclusion, Direction, EntityId, Event, Outcome, Proportion, UnitKind,
    Vector2i,
};
use snake_system_motor::{MotorStep, SnakeMotor};
use snake_world::{Entity, Grid, Snake};
use tracing::{debug, info};

use crate::{SceneConfig, SceneError};

/// Random cells tried before food placement falls back to scanning for free cells.
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Grid, snake, motor and food of one game, advanced one tick at a time.
#[derive(Debug)]
pub struct Grassland {
    grid: Grid,
    snake: Snake,
    motor: SnakeMotor,
    rng: ChaCha8Rng,
    growth_for_max_speed: Option<usize>,
    food: Option<EntityId>,
    last_direction: Direction,
    conclusion: Option<Conclusion>,
    ticks: u64,
}

impl Grassland {
    /// Spawns the snake and one food pellet on `grid`, which may already
    /// hold obstacles.
    pub fn new(mut grid: Grid, config: &SceneConfig) -> Result<Self, SceneError> {
        let position = config
            .spawn
            .unwrap_or_else(|| spawn_position(grid.width(), grid.height()));
        let snake = Snake::spawn(
            &mut grid,
            position,
            config.initial_growth,
            config.final_growth,
        )?;
        let motor = SnakeMotor::new(config.speed_range)?;
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut grassland = Self {
            grid,
            snake,
            motor,
            rng,
            growth_for_max_speed: config.growth_for_max_speed.filter(|growth| *growth > 0),
            food: None,
            last_direction: Direction::Up,
            conclusion: None,
            ticks: 0,
        };
        grassland.spawn_food()?;
        Ok(grassland)
    }

    /// Grid holding every entity of the game.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Handle to the snake.
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Motor pacing the snake.
    #[must_use]
    pub fn motor(&self) -> &SnakeMotor {
        &self.motor
    }

    /// Current length of the snake.
    #[must_use]
    pub fn growth(&self) -> usize {
        self.snake.growth(&self.grid)
    }

    /// Cell of the current food pellet, if one is placed.
    #[must_use]
    pub fn food_position(&self) -> Option<Vector2i> {
        let entity = self.grid.entity(self.food?)?;
        entity.units().first().map(|unit| unit.position())
    }

    /// Direction the snake moved in most recently.
    #[must_use]
    pub const fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Number of updates performed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// How the game ended, once it has.
    #[must_use]
    pub const fn conclusion(&self) -> Option<Conclusion> {
        self.conclusion
    }

    /// Final result of the game, once it has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.conclusion.map(|conclusion| Outcome {
            conclusion,
            growth: self.growth(),
            initial_growth: self.snake.initial_growth(),
        })
    }

    /// Advances the game by one tick, steering toward `requested` unless it
    /// would reverse the snake onto itself.
    pub fn update(&mut self, requested: Direction) -> Result<(), SceneError> {
        if self.conclusion.is_some() {
            return Ok(());
        }
        let direction = if requested == self.last_direction.opposite() {
            self.last_direction
        } else {
            requested
        };

        let mut events = Vec::new();
        let step = self
            .motor
            .process(&self.snake, &mut self.grid, direction.vector(), &mut events)?;
        self.ticks += 1;
        if step == MotorStep::Moved {
            self.last_direction = direction;
        }

        for event in events {
            self.handle(event)?;
        }
        Ok(())
    }

    fn handle(&mut self, event: Event) -> Result<(), SceneError> {
        match event {
            Event::AteFood { satisfied: true } => self.conclude(Conclusion::Satisfied),
            Event::AteFood { satisfied: false } => {
                self.food = None;
                self.spawn_food()?;
                self.raise_speed()?;
            }
            Event::Crashed { at } => {
                debug!(?at, "crash reported");
                self.conclude(Conclusion::Crashed);
            }
            Event::EntityCleared { entity } => {
                if self.food == Some(entity) {
                    self.food = None;
                }
            }
        }
        Ok(())
    }

    fn conclude(&mut self, conclusion: Conclusion) {
        info!(?conclusion, growth = self.growth(), ticks = self.ticks, "scene concluded");
        self.conclusion = Some(conclusion);
    }

    fn raise_speed(&mut self) -> Result<(), SceneError> {
        let Some(threshold) = self.growth_for_max_speed else {
            return Ok(());
        };
        let progress = (self.growth() as f32 / threshold as f32).min(1.0);
        let range = self.motor.speed_range();
        let speed = Proportion::new(progress)?
            .in_range(range.to_f32())
            .clamp(range.bottom().value(), range.top().value());
        self.motor.set_speed(Proportion::new(speed)?)?;
        Ok(())
    }

    fn spawn_food(&mut self) -> Result<(), SceneError> {
        let position = self.free_cell()?;
        let entity = self
            .grid
            .add_entity(Entity::new(UnitKind::Food, [position]));
        debug!(?position, entity = entity.get(), "food spawned");
        self.food = Some(entity);
        Ok(())
    }

    fn free_cell(&mut self) -> Result<Vector2i, SceneError> {
        let (width, height) = (self.grid.width(), self.grid.height());
        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let candidate = Vector2i::new(self.rng.gen_range(0..width), self.rng.gen_range(0..height));
            if self.grid.lookup(candidate)?.is_none() {
                return Ok(candidate);
            }
        }

        let mut free = Vec::new();
        for x in 0..width {
            for y in 0..height {
                let candidate = Vector2i::new(x, y);
                if self.grid.lookup(candidate)?.is_none() {
                    free.push(candidate);
                }
            }
        }
        if free.is_empty() {
            return Err(SceneError::NoFreeCell);
        }
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}
