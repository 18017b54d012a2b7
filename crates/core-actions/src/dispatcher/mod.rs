//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion`  - arrow key cursor movement
//! * `edit`    - append / backspace
//! * `command` - quit and save requests
//!
//! Every action either completes fully (buffer, cursor and effects all
//! consistent) or returns an error before the cursor is touched.

use crate::Action;
use core_state::{EditorError, EditorState, RenderEffect};
use smallvec::SmallVec;

mod command;
mod edit;
mod motion;

/// Effects produced by one action. No action emits more than one today.
pub type Effects = SmallVec<[RenderEffect; 2]>;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub effects: Effects,
    /// The caller must persist the current snapshot.
    pub save_requested: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn effect(effect: RenderEffect) -> Self {
        let mut effects = Effects::new();
        effects.push(effect);
        Self {
            effects,
            ..Self::default()
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn save() -> Self {
        Self {
            save_requested: true,
            ..Self::default()
        }
    }
}

/// Apply an action to editor state. A terminated session ignores everything.
pub fn dispatch(action: Action, state: &mut EditorState) -> Result<DispatchResult, EditorError> {
    if !state.is_running() {
        tracing::trace!(target: "actions.dispatch", "ignored_after_terminate");
        return Ok(DispatchResult::clean());
    }

    let result = match action {
        Action::Insert(ch) => edit::handle_insert(ch, state)?,
        Action::Backspace => edit::handle_backspace(state),
        Action::Move(dir) => motion::handle_motion(dir, state),
        Action::Quit => command::handle_quit(state),
        Action::Save => command::handle_save(state),
        Action::Unhandled => DispatchResult::clean(),
    };
    Ok(result)
}
