//! JSON game settings.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use snake_core::{Proportion, Range, DEFAULT_INITIAL_GROWTH, DEFAULT_SPEED_RANGE};
use snake_system_scene::{DEFAULT_GROWTH_FOR_MAX_SPEED, DEFAULT_TICK_RATE};
use tracing::info;

/// Narrowest playable grid.
pub(crate) const MIN_GRID_WIDTH: i32 = 9;
/// Shortest playable grid.
pub(crate) const MIN_GRID_HEIGHT: i32 = 9;

/// Game settings stored in the configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct Settings {
    pub(crate) grid_width: i32,
    pub(crate) grid_height: i32,
    pub(crate) tick_rate: u32,
    pub(crate) start_speed: Proportion,
    pub(crate) limit_speed: Proportion,
    pub(crate) growth_for_max_speed: usize,
    /// Omitted: fill every free cell. `null`: play without a final growth.
    #[serde(
        deserialize_with = "explicit_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) final_snake_growth: Option<Option<usize>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: 21,
            grid_height: 15,
            tick_rate: DEFAULT_TICK_RATE,
            start_speed: DEFAULT_SPEED_RANGE.bottom(),
            limit_speed: DEFAULT_SPEED_RANGE.top(),
            growth_for_max_speed: DEFAULT_GROWTH_FOR_MAX_SPEED,
            final_snake_growth: None,
        }
    }
}

/// Keeps an explicit `null` distinct from a missing field.
fn explicit_option<'de, D>(deserializer: D) -> Result<Option<Option<usize>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<usize>::deserialize(deserializer).map(Some)
}

impl Settings {
    /// Reads the settings at `path`, writing the defaults there first when
    /// the file does not exist.
    pub(crate) fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let defaults = Self::default();
            let json = serde_json::to_string_pretty(&defaults)
                .context("failed to serialise default settings")?;
            fs::write(path, json)
                .with_context(|| format!("failed to write default settings to {}", path.display()))?;
            info!(path = %path.display(), "default settings created");
            return Ok(defaults);
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse settings in {}", path.display()))?;
        Ok(settings)
    }

    /// Total number of cells.
    pub(crate) fn area(&self) -> usize {
        usize::try_from(self.grid_width).unwrap_or(0) * usize::try_from(self.grid_height).unwrap_or(0)
    }

    /// Speed bounds of the snake.
    pub(crate) fn speed_range(&self) -> Result<Range<Proportion>> {
        Range::new(self.start_speed, self.limit_speed).with_context(|| {
            format!(
                "start speed {} exceeds limit speed {}",
                self.start_speed.value(),
                self.limit_speed.value()
            )
        })
    }

    /// Final growth for a grid holding `obstacles` obstacle cells.
    pub(crate) fn final_growth(&self, obstacles: usize) -> Option<usize> {
        match self.final_snake_growth {
            None => Some(self.area().saturating_sub(obstacles)),
            Some(explicit) => explicit,
        }
    }

    /// Rejects settings the game cannot be played with on a grid holding
    /// `obstacles` obstacle cells.
    pub(crate) fn validate(&self, obstacles: usize) -> Result<()> {
        if self.grid_width < MIN_GRID_WIDTH {
            bail!("grid width cannot be less than {MIN_GRID_WIDTH} (got {})", self.grid_width);
        }
        if self.grid_height < MIN_GRID_HEIGHT {
            bail!(
                "grid height cannot be less than {MIN_GRID_HEIGHT} (got {})",
                self.grid_height
            );
        }
        if self.tick_rate == 0 {
            bail!("tick rate must be greater than zero");
        }
        if self.start_speed.is_min() {
            bail!("start speed must be greater than zero");
        }
        let _ = self.speed_range()?;

        if let Some(final_growth) = self.final_growth(obstacles) {
            let free_cells = self.area().saturating_sub(obstacles);
            if final_growth <= DEFAULT_INITIAL_GROWTH || final_growth > free_cells {
                bail!(
                    "final snake growth must be greater than the initial growth ({DEFAULT_INITIAL_GROWTH}) \
                     and at most the number of free cells ({free_cells}), got {final_growth}"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_without_final_growth() {
        let json = serde_json::to_string_pretty(&Settings::default()).expect("serialise");
        assert!(json.contains("\"GridWidth\": 21"));
        assert!(!json.contains("FinalSnakeGrowth"));

        let parsed: Settings = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, Settings::default());
        assert_eq!(parsed.final_growth(12), Some(21 * 15 - 12));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Settings = serde_json::from_str(r#"{ "TickRate": 30 }"#).expect("parse");
        assert_eq!(parsed.tick_rate, 30);
        assert_eq!(parsed.grid_height, 15);
    }

    #[test]
    fn null_final_growth_means_unlimited() {
        let parsed: Settings =
            serde_json::from_str(r#"{ "FinalSnakeGrowth": null }"#).expect("parse");
        assert_eq!(parsed.final_snake_growth, Some(None));
        assert_eq!(parsed.final_growth(0), None);
        parsed.validate(0).expect("unlimited growth is valid");

        let parsed: Settings =
            serde_json::from_str(r#"{ "FinalSnakeGrowth": 10 }"#).expect("parse");
        assert_eq!(parsed.final_growth(100), Some(10));
    }

    #[test]
    fn out_of_range_speed_is_rejected_while_parsing() {
        assert!(serde_json::from_str::<Settings>(r#"{ "StartSpeed": 1.5 }"#).is_err());
    }

    #[test]
    fn validation_rejects_unplayable_settings() {
        let narrow = Settings {
            grid_width: 8,
            ..Settings::default()
        };
        assert!(narrow.validate(0).is_err());

        let inverted = Settings {
            start_speed: Proportion::new(0.9).expect("speed"),
            ..Settings::default()
        };
        assert!(inverted.validate(0).is_err());

        let tiny_goal = Settings {
            final_snake_growth: Some(Some(DEFAULT_INITIAL_GROWTH)),
            ..Settings::default()
        };
        assert!(tiny_goal.validate(0).is_err());

        let huge_goal = Settings {
            final_snake_growth: Some(Some(21 * 15 + 1)),
            ..Settings::default()
        };
        assert!(huge_goal.validate(0).is_err());

        Settings::default().validate(68).expect("defaults are valid");

        let whole_grid = Settings {
            final_snake_growth: Some(Some(21 * 15)),
            ..Settings::default()
        };
        whole_grid.validate(0).expect("reachable without obstacles");
        assert!(whole_grid.validate(1).is_err());
    }
}
