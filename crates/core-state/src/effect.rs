//! Render instructions emitted by the session for the terminal layer.

use crate::Cursor;

/// One visible change to apply to the screen. Effects for a single key
/// event are applied in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEffect {
    /// Draw `ch` at the current terminal cursor.
    PutChar(char),
    /// Erase the cell at (`row`, `col`) and leave the cursor there.
    DeleteCharAt { row: u16, col: u16 },
    MoveCursor { row: u16, col: u16 },
}

impl RenderEffect {
    pub fn delete_at(cursor: Cursor) -> Self {
        RenderEffect::DeleteCharAt {
            row: cursor.row,
            col: cursor.col,
        }
    }

    pub fn move_to(cursor: Cursor) -> Self {
        RenderEffect::MoveCursor {
            row: cursor.row,
            col: cursor.col,
        }
    }
}
