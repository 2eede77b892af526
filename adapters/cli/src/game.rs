//! Wires settings, the scene, the terminal and an optional bot together.

use std::{
    collections::BTreeSet,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_core::{spawn_position, Outcome, UnitKind, Vector2i, DEFAULT_INITIAL_GROWTH};
use snake_rendering::{
    format_elapsed, Frame, InfoPanel, Palette, PlayClock, RenderingBackend, SnakeColor,
};
use snake_system_bot::Bot;
use snake_system_obstacles::{GridMetrics, Registry};
use snake_system_scene::{Grassland, Notice, Scene, SceneConfig, SceneError};
use snake_world::{Entity, Grid, Unit};
use tracing::{debug, info, warn};

use crate::{
    settings::Settings,
    terminal::{self, Command, TerminalBackend},
};

const INPUT_POLL: Duration = Duration::from_millis(20);
const SNAKE_COLORS: [SnakeColor; 3] = [SnakeColor::Green, SnakeColor::Cyan, SnakeColor::Yellow];

/// Per-run choices taken from the command line.
#[derive(Clone, Debug, Default)]
pub(crate) struct PlayOptions {
    pub(crate) ops: Option<String>,
    pub(crate) bot: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) color: Option<SnakeColor>,
}

/// Grid and scene parameters ready to build a [`Scene`] from.
#[derive(Debug)]
pub(crate) struct Setup {
    pub(crate) grid: Grid,
    pub(crate) config: SceneConfig,
    pub(crate) color: SnakeColor,
    pub(crate) obstacles: usize,
}

/// Validates `settings` and lays out the grid with the requested obstacles.
pub(crate) fn prepare(settings: &Settings, options: &PlayOptions) -> Result<Setup> {
    let mut rng = match options.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let metrics = GridMetrics::new(settings.grid_width, settings.grid_height);
    let mut positions = match options.ops.as_deref() {
        Some(ops) => Registry::with_initial_growth(DEFAULT_INITIAL_GROWTH)
            .resolve_chain(ops)
            .context("invalid obstacle placement")?
            .positions(metrics, &mut rng),
        None => BTreeSet::new(),
    };
    for cell in spawn_cells(settings) {
        let _ = positions.remove(&cell);
    }
    settings.validate(positions.len())?;

    let obstacles = positions.len();
    let mut grid = Grid::new(settings.grid_width, settings.grid_height)?;
    if obstacles > 0 {
        let _ = grid.add_entity(Entity::new(UnitKind::Obstacle, positions));
    }

    let color = options
        .color
        .unwrap_or_else(|| SNAKE_COLORS[rng.gen_range(0..SNAKE_COLORS.len())]);
    let config = SceneConfig {
        tick_rate: settings.tick_rate,
        speed_range: settings.speed_range()?,
        growth_for_max_speed: Some(settings.growth_for_max_speed),
        initial_growth: DEFAULT_INITIAL_GROWTH,
        final_growth: settings.final_growth(obstacles),
        rng_seed: Some(rng.gen()),
        spawn: None,
    };
    debug!(obstacles, ?config, "game prepared");

    Ok(Setup {
        grid,
        config,
        color,
        obstacles,
    })
}

/// Cells the freshly spawned snake covers.
fn spawn_cells(settings: &Settings) -> Vec<Vector2i> {
    let head = spawn_position(settings.grid_width, settings.grid_height);
    (0..DEFAULT_INITIAL_GROWTH)
        .map(|offset| {
            let y = head.y() + i32::try_from(offset).unwrap_or(i32::MAX);
            Vector2i::new(head.x(), y.rem_euclid(settings.grid_height.max(1)))
        })
        .collect()
}

/// Final report of a played game.
#[derive(Debug)]
pub(crate) enum Report {
    Finished {
        outcome: Outcome,
        last_frame: Option<Frame>,
    },
    Canceled {
        last_frame: Option<Frame>,
    },
}

/// Plays one game in the terminal until it concludes or the player quits.
pub(crate) fn play(setup: Setup, bot: bool) -> Result<Report> {
    let Setup {
        grid,
        config,
        color,
        obstacles,
    } = setup;
    let mut scene = Scene::new(grid, &config)?;
    info!(obstacles, bot, "game starting");

    let renderer = Arc::new(Mutex::new(Renderer::new(
        TerminalBackend::new(),
        Palette::for_snake(color),
        config.final_growth,
        Instant::now(),
    )));
    {
        let renderer = Arc::clone(&renderer);
        scene.subscribe(move |notice| match renderer.lock() {
            Ok(mut renderer) => {
                if let Err(err) = renderer.on_notice(notice, Instant::now()) {
                    warn!(%err, "failed to render frame");
                }
            }
            Err(_) => warn!("renderer lock poisoned"),
        })?;
    }
    if bot {
        subscribe_bot(&scene)?;
    }

    let cleanup = terminal::enter()?;
    let controller = scene.controller();
    scene.play()?;

    while !scene.is_finished() {
        match terminal::poll_command(INPUT_POLL)? {
            Some(Command::Steer(direction)) if !bot => controller.direct(direction, true)?,
            Some(Command::TogglePause) => {
                let _ = controller.toggle_pause()?;
            }
            Some(Command::Resume) => controller.set_paused(false)?,
            Some(Command::Quit) => controller.terminate()?,
            Some(Command::Steer(_)) | None => {}
        }
    }
    let result = scene.wait();
    drop(cleanup);

    let last_frame = renderer
        .lock()
        .ok()
        .and_then(|mut renderer| renderer.last_frame.take());
    match result {
        Ok(outcome) => Ok(Report::Finished {
            outcome,
            last_frame,
        }),
        Err(SceneError::Cancelled) => Ok(Report::Canceled { last_frame }),
        Err(err) => Err(err).context("the game failed"),
    }
}

fn subscribe_bot(scene: &Scene) -> Result<()> {
    let controller = scene.controller();
    let bot = Mutex::new(Bot::new());
    scene.subscribe(move |notice| {
        let Notice::Updated(grassland) = notice else {
            return;
        };
        if grassland.conclusion().is_some() {
            return;
        }
        let Some(head) = grassland.snake().head(grassland.grid()).map(Unit::position) else {
            return;
        };
        let Ok(mut bot) = bot.lock() else {
            warn!("bot lock poisoned");
            return;
        };
        match bot.steer(grassland.grid(), head) {
            Ok(Some(direction)) => {
                if let Err(err) = controller.direct(direction, true) {
                    warn!(%err, "bot failed to steer");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "bot failed to plan a route"),
        }
    })?;
    Ok(())
}

/// Turns scene notices into presented frames.
#[derive(Debug)]
struct Renderer<B> {
    backend: B,
    palette: Palette,
    panel: InfoPanel,
    clock: PlayClock,
    final_growth: Option<usize>,
    last_frame: Option<Frame>,
}

impl<B: RenderingBackend> Renderer<B> {
    fn new(backend: B, palette: Palette, final_growth: Option<usize>, now: Instant) -> Self {
        Self {
            backend,
            palette,
            panel: InfoPanel::new(),
            clock: PlayClock::started_at(now),
            final_growth,
            last_frame: None,
        }
    }

    fn on_notice(&mut self, notice: Notice<'_>, now: Instant) -> Result<()> {
        match notice {
            Notice::Updated(grassland) => self.draw(grassland, now),
            Notice::PauseChanged { paused } => {
                self.clock.set_paused(paused, now);
                Ok(())
            }
        }
    }

    fn draw(&mut self, grassland: &Grassland, now: Instant) -> Result<()> {
        let growth = grassland.growth();
        self.panel.set("Time", format_elapsed(self.clock.elapsed(now)));
        match self.final_growth {
            Some(final_growth) => self.panel.set("Growth", format!("{growth}/{final_growth}")),
            None => self.panel.set("Growth", growth),
        }

        let frame = Frame::capture(grassland.grid())?;
        let info = self.panel.lines(frame.line_width())?;
        let frame = frame.with_info(info);
        self.backend.present(&frame, &self.palette)?;
        self.last_frame = Some(frame);
        Ok(())
    }
}
