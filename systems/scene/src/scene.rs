//! Background worker that paces a [`Grassland`] in wall-clock time.

use std::{
    any::Any,
    fmt,
    sync::{Arc, Condvar, Mutex, MutexGuard, RwLock},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use snake_core::{Direction, Outcome};
use snake_world::Grid;
use tracing::{debug, info, warn};

use crate::{Grassland, SceneConfig, SceneError};

/// Notification fanned out to every subscribed listener.
#[derive(Clone, Copy, Debug)]
pub enum Notice<'a> {
    /// The grassland was advanced, or shown for the first time.
    Updated(&'a Grassland),
    /// The scene was paused or resumed.
    PauseChanged {
        /// Whether the scene is now paused.
        paused: bool,
    },
}

type Listener = Arc<dyn Fn(Notice<'_>) + Send + Sync>;

#[derive(Debug)]
struct Control {
    requested: Direction,
    paused: bool,
    cancelled: bool,
    disposed: bool,
}

/// State shared between the worker and every controller.
struct Shared {
    control: Mutex<Control>,
    wake: Condvar,
    listeners: RwLock<Vec<Listener>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            control: Mutex::new(Control {
                requested: Direction::Up,
                paused: false,
                cancelled: false,
                disposed: false,
            }),
            wake: Condvar::new(),
            listeners: RwLock::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Control>, SceneError> {
        self.control.lock().map_err(|_| SceneError::Poisoned)
    }

    /// Calls every listener without holding the listener lock, so listeners
    /// may subscribe further listeners.
    fn notify(&self, notice: Notice<'_>) -> Result<(), SceneError> {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .map_err(|_| SceneError::Poisoned)?
            .iter()
            .cloned()
            .collect();
        for listener in &listeners {
            listener(notice);
        }
        Ok(())
    }

    /// Blocks while paused and returns the direction to apply next.
    fn checkpoint(&self) -> Result<Direction, SceneError> {
        let control = self.lock()?;
        let control = self
            .wake
            .wait_while(control, |control| control.paused && !control.cancelled)
            .map_err(|_| SceneError::Poisoned)?;
        if control.cancelled {
            return Err(SceneError::Cancelled);
        }
        Ok(control.requested)
    }

    /// Sleeps for `timeout` unless cancelled first.
    fn sleep(&self, timeout: Duration) -> Result<(), SceneError> {
        let control = self.lock()?;
        let (control, _) = self
            .wake
            .wait_timeout_while(control, timeout, |control| !control.cancelled)
            .map_err(|_| SceneError::Poisoned)?;
        if control.cancelled {
            return Err(SceneError::Cancelled);
        }
        Ok(())
    }
}

impl fmt::Debug for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read().map(|list| list.len()).ok();
        f.debug_struct("Shared")
            .field("control", &self.control)
            .field("listeners", &listeners)
            .finish()
    }
}

/// Cloneable handle used to steer, pause and terminate a scene from any thread.
#[derive(Clone, Debug)]
pub struct Controller {
    shared: Arc<Shared>,
}

impl Controller {
    /// Records `direction` for the next tick. Never changes the pause state.
    ///
    /// While the scene is paused the request is kept only when `ignore_pause`
    /// is set, and then takes effect on the first tick after resuming.
    pub fn direct(&self, direction: Direction, ignore_pause: bool) -> Result<(), SceneError> {
        let mut control = self.live()?;
        if control.paused && !ignore_pause {
            debug!(?direction, "direction discarded while paused");
            return Ok(());
        }
        control.requested = direction;
        Ok(())
    }

    /// Pauses or resumes the scene, notifying listeners when the state changes.
    pub fn set_paused(&self, paused: bool) -> Result<(), SceneError> {
        let changed = {
            let mut control = self.live()?;
            let changed = control.paused != paused;
            control.paused = paused;
            changed
        };
        if changed {
            debug!(paused, "scene pause changed");
            self.shared.wake.notify_all();
            self.shared.notify(Notice::PauseChanged { paused })?;
        }
        Ok(())
    }

    /// Flips the pause state and returns the new one.
    pub fn toggle_pause(&self) -> Result<bool, SceneError> {
        let paused = !self.is_paused()?;
        self.set_paused(paused)?;
        Ok(paused)
    }

    /// Reports whether the scene is paused.
    pub fn is_paused(&self) -> Result<bool, SceneError> {
        Ok(self.live()?.paused)
    }

    /// Registers a listener invoked synchronously for every [`Notice`].
    ///
    /// Update notices are delivered on the worker thread; pause notices on
    /// whichever thread changed the pause state. Listeners may subscribe
    /// further listeners, which receive notices from the next one on.
    pub fn subscribe<F>(&self, listener: F) -> Result<(), SceneError>
    where
        F: Fn(Notice<'_>) + Send + Sync + 'static,
    {
        self.shared
            .listeners
            .write()
            .map_err(|_| SceneError::Poisoned)?
            .push(Arc::new(listener));
        Ok(())
    }

    /// Requests cooperative cancellation; the worker stops before its next tick.
    pub fn terminate(&self) -> Result<(), SceneError> {
        self.live()?.cancelled = true;
        self.shared.wake.notify_all();
        Ok(())
    }

    fn live(&self) -> Result<MutexGuard<'_, Control>, SceneError> {
        let control = self.shared.lock()?;
        if control.disposed {
            return Err(SceneError::Disposed);
        }
        Ok(control)
    }
}

/// Snake game advanced on a dedicated worker thread.
#[derive(Debug)]
pub struct Scene {
    grassland: Arc<RwLock<Grassland>>,
    controller: Controller,
    period: Duration,
    worker: Option<JoinHandle<Result<Outcome, SceneError>>>,
    started: bool,
}

impl Scene {
    /// Builds the scene on `grid`, spawning the snake and its first food.
    pub fn new(grid: Grid, config: &SceneConfig) -> Result<Self, SceneError> {
        if config.tick_rate == 0 {
            return Err(SceneError::InvalidTickRate);
        }
        let grassland = Grassland::new(grid, config)?;
        Ok(Self {
            grassland: Arc::new(RwLock::new(grassland)),
            controller: Controller {
                shared: Arc::new(Shared::new()),
            },
            period: Duration::from_secs_f64(1.0 / f64::from(config.tick_rate)),
            worker: None,
            started: false,
        })
    }

    /// Wall-clock duration of one tick.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Handle for steering the scene from other threads.
    #[must_use]
    pub fn controller(&self) -> Controller {
        self.controller.clone()
    }

    /// See [`Controller::subscribe`].
    pub fn subscribe<F>(&self, listener: F) -> Result<(), SceneError>
    where
        F: Fn(Notice<'_>) + Send + Sync + 'static,
    {
        self.controller.subscribe(listener)
    }

    /// Runs `inspect` against the current grassland.
    pub fn inspect<R>(&self, inspect: impl FnOnce(&Grassland) -> R) -> Result<R, SceneError> {
        let grassland = self.grassland.read().map_err(|_| SceneError::Poisoned)?;
        Ok(inspect(&grassland))
    }

    /// Starts the worker thread.
    pub fn play(&mut self) -> Result<(), SceneError> {
        drop(self.controller.live()?);
        if self.started {
            return Err(SceneError::AlreadyRunning);
        }

        let grassland = Arc::clone(&self.grassland);
        let shared = Arc::clone(&self.controller.shared);
        let period = self.period;
        let worker = thread::Builder::new()
            .name("snake-scene".into())
            .spawn(move || run_loop(&grassland, &shared, period))
            .map_err(|err| SceneError::Worker(format!("failed to spawn scene worker: {err}")))?;

        self.worker = Some(worker);
        self.started = true;
        Ok(())
    }

    /// Blocks until the worker finishes and returns its result.
    pub fn wait(&mut self) -> Result<Outcome, SceneError> {
        let worker = self.worker.take().ok_or(SceneError::NotRunning)?;
        worker
            .join()
            .map_err(|payload| SceneError::Panicked(panic_message(payload.as_ref())))?
    }

    /// Starts the worker and blocks until it finishes.
    pub fn run(&mut self) -> Result<Outcome, SceneError> {
        self.play()?;
        self.wait()
    }

    /// Reports whether the worker has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(self.started, JoinHandle::is_finished)
    }

    /// See [`Controller::set_paused`].
    pub fn set_paused(&self, paused: bool) -> Result<(), SceneError> {
        self.controller.set_paused(paused)
    }

    /// See [`Controller::toggle_pause`].
    pub fn toggle_pause(&self) -> Result<bool, SceneError> {
        self.controller.toggle_pause()
    }

    /// See [`Controller::is_paused`].
    pub fn is_paused(&self) -> Result<bool, SceneError> {
        self.controller.is_paused()
    }

    /// See [`Controller::terminate`].
    pub fn terminate(&self) -> Result<(), SceneError> {
        self.controller.terminate()
    }

    /// Cancels the worker, waits for it to exit and invalidates every
    /// controller. Disposing more than once does nothing.
    pub fn dispose(&mut self) {
        let already_disposed = match self.controller.shared.lock() {
            Ok(mut control) => {
                let already_disposed = control.disposed;
                control.cancelled = true;
                control.disposed = true;
                already_disposed
            }
            Err(_) => false,
        };
        if already_disposed {
            return;
        }
        self.controller.shared.wake.notify_all();

        if self.worker.is_some() {
            match self.wait() {
                Ok(outcome) => debug!(?outcome, "scene disposed after concluding"),
                Err(SceneError::Cancelled) => debug!("scene disposed after cancellation"),
                Err(err) => warn!(%err, "scene worker failed before disposal"),
            }
        }
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn run_loop(
    grassland: &RwLock<Grassland>,
    shared: &Shared,
    period: Duration,
) -> Result<Outcome, SceneError> {
    info!(period_ms = period.as_millis() as u64, "scene started");
    let result = tick_until_concluded(grassland, shared, period);
    match &result {
        Ok(outcome) => info!(?outcome, "scene finished"),
        Err(SceneError::Cancelled) => info!("scene cancelled"),
        Err(err) => warn!(%err, "scene failed"),
    }
    result
}

fn tick_until_concluded(
    grassland: &RwLock<Grassland>,
    shared: &Shared,
    period: Duration,
) -> Result<Outcome, SceneError> {
    notify_updated(grassland, shared)?;
    shared.sleep(period)?;

    loop {
        let requested = shared.checkpoint()?;
        let started = Instant::now();

        let outcome = {
            let mut state = grassland.write().map_err(|_| SceneError::Poisoned)?;
            state.update(requested)?;
            state.outcome()
        };
        notify_updated(grassland, shared)?;
        if let Some(outcome) = outcome {
            return Ok(outcome);
        }

        let elapsed = started.elapsed();
        if elapsed > period {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                period_ms = period.as_millis() as u64,
                "tick overran its period"
            );
        }
        shared.sleep(period.saturating_sub(elapsed))?;
    }
}

fn notify_updated(grassland: &RwLock<Grassland>, shared: &Shared) -> Result<(), SceneError> {
    let state = grassland.read().map_err(|_| SceneError::Poisoned)?;
    shared.notify(Notice::Updated(&state))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
