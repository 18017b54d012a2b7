//! The editor session: sole owner of the editor state and its backing
//! store for one run, from load to quit.

use crate::dispatcher::{Effects, dispatch};
use crate::io_ops::{DocumentStore, FileStore};
use crate::Action;
use core_state::{Cursor, EditorError, EditorState, RenderEffect, ScreenSize, SessionState};
use core_text::Buffer;

/// One editing session: the single owner of the buffer, the cursor and the
/// backing store.
///
/// Any error returned from [`EditorSession::handle`] is fatal; the session
/// is already `Terminated` when the caller sees it.
#[derive(Debug)]
pub struct EditorSession<S = FileStore> {
    state: EditorState,
    store: S,
}

impl<S: DocumentStore> EditorSession<S> {
    /// Load the initial buffer from `store`.
    pub fn open(store: S, screen: ScreenSize) -> Result<Self, EditorError> {
        let buffer = store.load()?;
        Ok(Self::new(store, buffer, screen))
    }

    pub fn new(store: S, buffer: Buffer, screen: ScreenSize) -> Self {
        Self {
            state: EditorState::new(buffer, screen),
            store,
        }
    }

    pub fn with_tab_width(mut self, tab_width: u16) -> Self {
        self.state = self.state.with_tab_width(tab_width);
        self
    }

    /// Apply one decoded key event and return the effects to render, in
    /// order. `Save` writes the snapshot before returning.
    pub fn handle(&mut self, action: Action) -> Result<Effects, EditorError> {
        let result = match dispatch(action, &mut self.state) {
            Ok(result) => result,
            Err(e) => return Err(self.fail(e)),
        };
        if result.save_requested {
            self.save()?;
        }
        Ok(result.effects)
    }

    /// Persist the current snapshot. Failure terminates the session.
    pub fn save(&mut self) -> Result<(), EditorError> {
        match self.store.store(self.state.buffer().snapshot()) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Effects painting the loaded buffer onto a cleared screen. The cursor
    /// advances as it would for typed input and ends just past the drawn
    /// text; drawing stops at the bottom-right cell.
    pub fn initial_draw(&mut self) -> Vec<RenderEffect> {
        let (screen, tab_width) = (self.state.screen(), self.state.tab_width());
        let mut cursor = Cursor::origin();
        let mut effects = Vec::new();
        for ch in self.state.buffer().snapshot().chars() {
            effects.push(RenderEffect::PutChar(ch));
            if cursor.advance(ch, screen, tab_width) {
                break;
            }
        }
        *self.state.cursor_mut() = cursor;
        tracing::debug!(
            target: "actions.session",
            drawn = effects.len(),
            len = self.state.buffer().len(),
            row = cursor.row,
            col = cursor.col,
            "initial_draw"
        );
        effects
    }

    /// New screen bounds. Returns a cursor move if clamping displaced it.
    pub fn resize(&mut self, screen: ScreenSize) -> Option<RenderEffect> {
        self.state
            .set_screen(screen)
            .then(|| RenderEffect::move_to(self.state.cursor()))
    }

    pub fn snapshot(&self) -> &str {
        self.state.buffer().snapshot()
    }

    pub fn buffer(&self) -> &Buffer {
        self.state.buffer()
    }

    pub fn cursor(&self) -> Cursor {
        self.state.cursor()
    }

    pub fn screen(&self) -> ScreenSize {
        self.state.screen()
    }

    pub fn state(&self) -> SessionState {
        self.state.session()
    }

    pub fn is_terminated(&self) -> bool {
        !self.state.is_running()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn fail(&mut self, e: EditorError) -> EditorError {
        tracing::error!(target: "actions.session", kind = e.kind(), error = %e, "session_failed");
        self.state.terminate();
        e
    }
}
