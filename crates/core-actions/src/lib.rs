//! Action model, key translation, dispatch and persistence for the editor
//! session.
//!
//! Flow per key: `KeyEvent` --[`translate_key`]--> [`Action`]
//! --[`EditorSession::handle`]--> buffer/cursor mutation + render effects,
//! plus a write to the [`DocumentStore`] when the action is `Save`.

pub mod dispatcher;
pub mod io_ops;
mod key_translator;
mod session;

pub use dispatcher::{DispatchResult, Effects, dispatch};
pub use io_ops::{DocumentStore, FileStore, open_file, write_file};
pub use key_translator::translate_key;
pub use session::EditorSession;

pub use core_state::Direction;

/// Decoded key event: the complete input alphabet of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Printable character or whitespace to append to the document.
    Insert(char),
    Quit,
    Save,
    Backspace,
    Move(Direction),
    /// Anything else; ignored.
    Unhandled,
}

impl Action {
    /// Log-safe name; never includes the typed character.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Insert(_) => "insert",
            Action::Quit => "quit",
            Action::Save => "save",
            Action::Backspace => "backspace",
            Action::Move(_) => "move",
            Action::Unhandled => "unhandled",
        }
    }
}
