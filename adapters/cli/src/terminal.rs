//! Crossterm presentation and keyboard mapping.

use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use snake_core::Direction;
use snake_rendering::{Color, Frame, Palette, RenderingBackend};

/// Player intent decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Steer(Direction),
    TogglePause,
    Resume,
    Quit,
}

/// Maps a key press onto a player command.
pub(crate) fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Steer(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => Command::TogglePause,
        KeyCode::Enter => Command::Resume,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Waits up to `timeout` for a key press and decodes it.
pub(crate) fn poll_command(timeout: Duration) -> Result<Option<Command>> {
    if !event::poll(timeout).context("failed to poll terminal events")? {
        return Ok(None);
    }
    match event::read().context("failed to read terminal event")? {
        Event::Key(key) => Ok(command_for(key)),
        _ => Ok(None),
    }
}

/// Puts the terminal into raw mode on the alternate screen.
pub(crate) fn enter() -> Result<TerminalCleanup> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let cleanup = TerminalCleanup;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))
        .context("failed to enter alternate screen")?;
    Ok(cleanup)
}

/// Restores the terminal when dropped.
pub(crate) struct TerminalCleanup;

impl Drop for TerminalCleanup {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
    }
}

/// Draws frames onto the terminal in place.
#[derive(Debug)]
pub(crate) struct TerminalBackend {
    stdout: Stdout,
}

impl TerminalBackend {
    pub(crate) fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl RenderingBackend for TerminalBackend {
    fn present(&mut self, frame: &Frame, palette: &Palette) -> Result<()> {
        let mut row: u16 = 0;
        queue!(self.stdout, MoveTo(0, row), ResetColor, Print(frame.upper_border()))?;

        for cells in frame.rows() {
            row += 1;
            queue!(self.stdout, MoveTo(0, row), ResetColor, Print("║ "))?;
            for cell in cells {
                queue!(
                    self.stdout,
                    SetForegroundColor(terminal_color(palette.color(cell.style))),
                    Print(cell.glyph),
                    Print(' ')
                )?;
            }
            queue!(self.stdout, ResetColor, Print('║'))?;
        }

        row += 1;
        queue!(self.stdout, MoveTo(0, row), Print(frame.lower_border()))?;
        for line in frame.info() {
            row += 1;
            queue!(
                self.stdout,
                MoveTo(0, row),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        queue!(self.stdout, Clear(ClearType::FromCursorDown))?;
        self.stdout.flush().context("failed to flush frame")?;
        Ok(())
    }
}

fn terminal_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb_u8();
    TermColor::Rgb { r, g, b }
}
