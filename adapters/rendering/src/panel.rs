//! Info panel text and the pause-aware play clock.

use std::{
    fmt,
    time::{Duration, Instant},
};

use crate::RenderingError;

const SPACES_BETWEEN_ITEMS: usize = 3;
const ELLIPSIS: &str = "...";

/// Named values laid out below the grid, wrapped to the frame width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoPanel {
    items: Vec<(String, String)>,
}

impl InfoPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value shown under `name`, appending the item on first use.
    pub fn set(&mut self, name: &str, value: impl fmt::Display) {
        let value = value.to_string();
        match self.items.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.items.push((name.to_owned(), value)),
        }
    }

    /// Lays the items out on lines no longer than `max_line_length`
    /// characters. Items that do not fit on a line of their own are truncated
    /// with an ellipsis.
    pub fn lines(&self, max_line_length: usize) -> Result<Vec<String>, RenderingError> {
        if max_line_length == 0 {
            return Err(RenderingError::InvalidLineLength { max_line_length });
        }

        let mut lines = Vec::new();
        let mut line = String::new();
        for (name, value) in &self.items {
            let item = truncate(&format!("{name}: {value}"), max_line_length);
            let item_length = item.chars().count();

            if !line.is_empty() {
                let used = line.chars().count();
                if used + SPACES_BETWEEN_ITEMS + item_length <= max_line_length {
                    line.push_str(&" ".repeat(SPACES_BETWEEN_ITEMS));
                } else {
                    lines.push(std::mem::take(&mut line));
                }
            }
            line.push_str(&item);
        }
        if !line.is_empty() {
            lines.push(line);
        }
        Ok(lines)
    }
}

fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_owned();
    }
    let keep = max_length.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(&ELLIPSIS[..max_length.min(ELLIPSIS.len())]);
    truncated
}

/// Formats `elapsed` as minutes and seconds, e.g. `03:07`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Elapsed play time that stands still while the scene is paused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayClock {
    accumulated: Duration,
    resumed_at: Option<Instant>,
}

impl PlayClock {
    /// Creates a stopped clock showing zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock running since `now`.
    #[must_use]
    pub fn started_at(now: Instant) -> Self {
        Self {
            accumulated: Duration::ZERO,
            resumed_at: Some(now),
        }
    }

    /// Reports whether the clock is counting.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// Stops or restarts counting, as reported by a pause notification.
    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        match (paused, self.resumed_at) {
            (true, Some(resumed_at)) => {
                self.accumulated += now.saturating_duration_since(resumed_at);
                self.resumed_at = None;
            }
            (false, None) => self.resumed_at = Some(now),
            _ => {}
        }
    }

    /// Time counted up to `now`.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .resumed_at
                .map_or(Duration::ZERO, |resumed_at| now.saturating_duration_since(resumed_at))
    }
}
