#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Speed throttle that turns a continuous snake speed into a move/skip cadence.
//!
//! The motor is ticked once per scene update. A slow snake withholds movement
//! for several ticks before stepping once; a snake at full speed steps on
//! every tick.

use snake_core::{Event, Proportion, Range, Vector2i};
use snake_world::{Grid, Snake, WorldError};
use thiserror::Error;
use tracing::debug;

/// Largest number of ticks skipped between two moves (reached at zero speed).
pub const MAX_MOVE_SKIPS: u32 = 10;

/// Failures raised while configuring the motor.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MotorError {
    /// The slowest configured speed would never move the snake.
    #[error("the bottom of the speed range must be greater than zero")]
    StalledSpeedRange,
    /// A requested speed fell outside the configured range.
    #[error("speed {requested} is outside of the range {bottom}..={top}")]
    SpeedOutOfRange {
        /// Requested speed value.
        requested: f32,
        /// Slowest permitted speed.
        bottom: f32,
        /// Fastest permitted speed.
        top: f32,
    },
}

/// Result of a single [`SnakeMotor::process`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotorStep {
    /// The tick was consumed by the skip counter.
    Skipped,
    /// The snake stepped one cell.
    Moved,
}

/// Drives a snake one cell at a time, skipping ticks according to its speed.
#[derive(Clone, Debug)]
pub struct SnakeMotor {
    speed_range: Range<Proportion>,
    speed: Proportion,
    skips_done: u32,
}

impl SnakeMotor {
    /// Creates a motor running at the bottom of `speed_range`.
    pub fn new(speed_range: Range<Proportion>) -> Result<Self, MotorError> {
        if speed_range.bottom().is_min() {
            return Err(MotorError::StalledSpeedRange);
        }
        Ok(Self {
            speed_range,
            speed: speed_range.bottom(),
            skips_done: 0,
        })
    }

    /// Current speed.
    #[must_use]
    pub const fn speed(&self) -> Proportion {
        self.speed
    }

    /// Range the speed is confined to.
    #[must_use]
    pub const fn speed_range(&self) -> Range<Proportion> {
        self.speed_range
    }

    /// Changes the speed, rejecting values outside the configured range.
    pub fn set_speed(&mut self, speed: Proportion) -> Result<(), MotorError> {
        if !self.speed_range.includes(speed) {
            return Err(MotorError::SpeedOutOfRange {
                requested: speed.value(),
                bottom: self.speed_range.bottom().value(),
                top: self.speed_range.top().value(),
            });
        }
        if speed != self.speed {
            debug!(speed = speed.value(), "motor speed changed");
        }
        self.speed = speed;
        Ok(())
    }

    /// Number of ticks skipped before each move at the current speed.
    #[must_use]
    pub fn required_skips(&self) -> u32 {
        let skips = (MAX_MOVE_SKIPS as f32 * Proportion::opposite_of(self.speed).value()).round();
        skips as u32
    }

    /// Consumes one tick: either counts a skip or steps `snake` along
    /// `direction`, forwarding any eat/crash events into `out`.
    pub fn process(
        &mut self,
        snake: &Snake,
        grid: &mut Grid,
        direction: Vector2i,
        out: &mut Vec<Event>,
    ) -> Result<MotorStep, WorldError> {
        if self.skips_done < self.required_skips() {
            self.skips_done += 1;
            return Ok(MotorStep::Skipped);
        }

        self.skips_done = 0;
        snake.step(grid, direction, out)?;
        Ok(MotorStep::Moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(bottom: f32, top: f32) -> Range<Proportion> {
        Range::new(
            Proportion::new(bottom).expect("bottom"),
            Proportion::new(top).expect("top"),
        )
        .expect("range")
    }

    #[test]
    fn skip_count_follows_speed() {
        let mut motor = SnakeMotor::new(range(0.1, 1.0)).expect("motor");
        assert_eq!(motor.required_skips(), 9);
        motor
            .set_speed(Proportion::new(0.4).expect("speed"))
            .expect("in range");
        assert_eq!(motor.required_skips(), 6);
        motor.set_speed(Proportion::MAX).expect("in range");
        assert_eq!(motor.required_skips(), 0);
    }

    #[test]
    fn zero_bottom_is_rejected() {
        assert_eq!(
            SnakeMotor::new(range(0.0, 0.5)).err(),
            Some(MotorError::StalledSpeedRange)
        );
    }
}
