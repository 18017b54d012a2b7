//! Arrow key motion. Moves are clamped to the screen; a move that would
//! leave it is dropped without emitting anything.

use super::DispatchResult;
use core_state::{Direction, EditorState, RenderEffect};

pub(crate) fn handle_motion(dir: Direction, state: &mut EditorState) -> DispatchResult {
    let screen = state.screen();
    if !state.cursor_mut().step(dir, screen) {
        tracing::trace!(target: "actions.dispatch", ?dir, "motion_clamped");
        return DispatchResult::clean();
    }
    let cursor = state.cursor();
    tracing::trace!(target: "actions.dispatch", ?dir, row = cursor.row, col = cursor.col, "motion");
    DispatchResult::effect(RenderEffect::move_to(cursor))
}
