//! Session commands. Neither touches the buffer or the cursor; saving is
//! carried out by the session owner, which holds the document store.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_quit(state: &mut EditorState) -> DispatchResult {
    tracing::info!(target: "actions.dispatch", len = state.buffer().len(), "quit");
    state.terminate();
    DispatchResult::quit()
}

pub(crate) fn handle_save(state: &EditorState) -> DispatchResult {
    tracing::debug!(target: "actions.dispatch", len = state.buffer().len(), "save_requested");
    DispatchResult::save()
}
