//! Editor state: the document buffer, the clamped screen cursor and the
//! session lifecycle flag.
//!
//! This crate only holds data and the primitive mutations on it. Translating
//! actions into those mutations (and into render effects) is the job of the
//! dispatcher in `core-actions`, which is the single owner of an
//! `EditorState` for the duration of a session.

use core_text::Buffer;

mod cursor;
mod effect;
mod error;

pub use cursor::{Cursor, Direction, ScreenSize};
pub use effect::RenderEffect;
pub use error::EditorError;

/// Default distance between tab stops, matching curses.
pub const DEFAULT_TAB_WIDTH: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Terminal state: no further actions are applied.
    Terminated,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    buffer: Buffer,
    cursor: Cursor,
    screen: ScreenSize,
    tab_width: u16,
    session: SessionState,
}

impl EditorState {
    pub fn new(buffer: Buffer, screen: ScreenSize) -> Self {
        Self {
            buffer,
            cursor: Cursor::origin(),
            screen,
            tab_width: DEFAULT_TAB_WIDTH,
            session: SessionState::Running,
        }
    }

    pub fn with_tab_width(mut self, tab_width: u16) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Replace the screen bounds, clamping the cursor into them. Returns
    /// `true` when the cursor had to move.
    pub fn set_screen(&mut self, screen: ScreenSize) -> bool {
        self.screen = screen;
        let moved = self.cursor.clamp_to(screen);
        if moved {
            tracing::debug!(
                target: "state",
                rows = screen.rows(),
                cols = screen.cols(),
                row = self.cursor.row,
                col = self.cursor.col,
                "cursor_clamped_on_resize"
            );
        }
        moved
    }

    pub fn tab_width(&self) -> u16 {
        self.tab_width
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn is_running(&self) -> bool {
        matches!(self.session, SessionState::Running)
    }

    pub fn terminate(&mut self) {
        self.session = SessionState::Terminated;
    }
}
