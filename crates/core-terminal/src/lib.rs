//! Terminal backend abstraction and crossterm implementation.
//!
//! Raw mode (and optionally the alternate screen) is a scoped resource:
//! [`CrosstermBackend::enter_guard`] hands out a [`TerminalGuard`] that
//! restores the terminal when dropped, so every exit path out of the
//! runtime (quit, fatal error, signal-driven shutdown) leaves the shell
//! usable. Panics are covered separately by [`restore_terminal`].

use anyhow::Result;
use crossterm::{
    cursor::{MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CrosstermBackend {
    entered: bool,
    alternate_screen: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a> {
    backend: &'a mut CrosstermBackend,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CrosstermBackend {
    pub fn new(alternate_screen: bool) -> Self {
        Self {
            entered: false,
            alternate_screen,
        }
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Enter and return a guard that will leave on drop.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        self.enter()?;
        Ok(TerminalGuard { backend: self })
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            if self.alternate_screen {
                execute!(stdout(), EnterAlternateScreen)?;
            }
            execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
            self.entered = true;
            tracing::debug!(target: "terminal", alternate_screen = self.alternate_screen, "entered_raw_mode");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            if self.alternate_screen {
                execute!(stdout(), LeaveAlternateScreen)?;
            }
            execute!(stdout(), Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "terminal", "left_raw_mode");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            tracing::error!(target: "terminal", ?e, "terminal_restore_failed");
        }
    }
}

/// Best-effort restoration for contexts that cannot reach the guard (panic
/// hook). Safe to call when the terminal was never entered.
pub fn restore_terminal(alternate_screen: bool) {
    if alternate_screen {
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
    let _ = execute!(stdout(), Show);
    let _ = disable_raw_mode();
}
