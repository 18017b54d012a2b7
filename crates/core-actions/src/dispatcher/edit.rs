//! Text edits: append at end of buffer, delete last character.
//!
//! Insertion is end-append: the typed character always lands at the end of
//! the buffer, wherever the screen cursor is. The cursor only tracks where
//! the character is drawn.

use super::DispatchResult;
use core_state::{EditorError, EditorState, RenderEffect};

pub(crate) fn handle_insert(ch: char, state: &mut EditorState) -> Result<DispatchResult, EditorError> {
    // Grow first: on allocation failure neither cursor nor screen change.
    state.buffer_mut().insert_append(ch)?;
    let (screen, tab_width) = (state.screen(), state.tab_width());
    let before = state.cursor();
    let pinned = state.cursor_mut().advance(ch, screen, tab_width);
    let after = state.cursor();
    tracing::trace!(
        target: "actions.dispatch",
        op = "insert",
        whitespace = ch.is_ascii_whitespace(),
        len = state.buffer().len(),
        row = before.row,
        col = before.col,
        to_row = after.row,
        to_col = after.col,
        pinned,
        "edit"
    );
    Ok(DispatchResult::effect(RenderEffect::PutChar(ch)))
}

pub(crate) fn handle_backspace(state: &mut EditorState) -> DispatchResult {
    if state.buffer_mut().delete_last().is_none() {
        return DispatchResult::clean();
    }
    let screen = state.screen();
    let before = state.cursor();
    state.cursor_mut().retreat(screen);
    let after = state.cursor();
    tracing::trace!(
        target: "actions.dispatch",
        op = "backspace",
        len = state.buffer().len(),
        row = before.row,
        col = before.col,
        to_row = after.row,
        to_col = after.col,
        "edit"
    );
    DispatchResult::effect(RenderEffect::delete_at(after))
}
