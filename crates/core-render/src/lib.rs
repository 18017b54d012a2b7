//! Terminal rendering for the effect stream produced by the editor session.
//!
//! The session never draws. It emits `RenderEffect`s and this crate turns
//! them into an ordered list of terminal commands (`writer::Writer`) which the
//! runtime flushes once per processed event.
//!
//! Interpretation of effects:
//! - `PutChar`: printable characters are printed at the mirrored cursor; a tab
//!   prints spaces up to the next stop; `\n` and `\r` print nothing; other
//!   control characters print `?`.
//! - `DeleteCharAt`: blank the cell and leave the terminal cursor on it.
//! - `MoveCursor`: reposition only.
//!
//! After every batch `Renderer::sync_cursor` parks the terminal cursor on the
//! session cursor.

pub mod apply;
pub mod writer;

pub use apply::Renderer;
pub use writer::{Command, Writer};
