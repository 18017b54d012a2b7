//! Translate session render effects into writer commands.
//!
//! The renderer mirrors the session cursor using the same advance rules
//! (`core_state::Cursor::advance`), which is what lets it expand tabs and
//! skip redundant cursor moves. After every batch the terminal cursor is
//! synced to the session's authoritative cursor, so a mirror drift can never
//! outlive one key event.

use crate::writer::Writer;
use core_state::{Cursor, RenderEffect, ScreenSize};

#[derive(Debug)]
pub struct Renderer {
    screen: ScreenSize,
    tab_width: u16,
    cursor: Cursor,
    /// Where the terminal's own cursor is known to be; `None` after a print
    /// ran into the right margin (pending wrap is terminal specific).
    terminal_at: Option<Cursor>,
}

impl Renderer {
    pub fn new(screen: ScreenSize, tab_width: u16) -> Self {
        Self {
            screen,
            tab_width: tab_width.max(1),
            cursor: Cursor::origin(),
            terminal_at: None,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn resize(&mut self, screen: ScreenSize) {
        self.screen = screen;
        self.cursor.clamp_to(screen);
        self.terminal_at = None;
    }

    /// Clear the screen and home the cursor ahead of a full repaint.
    pub fn begin_full(&mut self, w: &mut Writer) {
        w.clear_all();
        self.cursor = Cursor::origin();
        self.terminal_at = Some(Cursor::origin());
    }

    pub fn apply(&mut self, w: &mut Writer, effects: &[RenderEffect]) {
        for effect in effects {
            match *effect {
                RenderEffect::PutChar(ch) => self.put_char(w, ch),
                RenderEffect::DeleteCharAt { row, col } => {
                    let at = Cursor::new(row, col);
                    w.move_to(col, row);
                    w.print(" ");
                    w.move_to(col, row);
                    self.cursor = at;
                    self.terminal_at = Some(at);
                }
                RenderEffect::MoveCursor { row, col } => {
                    let at = Cursor::new(row, col);
                    if self.terminal_at != Some(at) {
                        w.move_to(col, row);
                    }
                    self.cursor = at;
                    self.terminal_at = Some(at);
                }
            }
        }
    }

    /// Park the terminal cursor on the session cursor.
    pub fn sync_cursor(&mut self, w: &mut Writer, cursor: Cursor) {
        if self.terminal_at != Some(cursor) {
            w.move_to(cursor.col, cursor.row);
        }
        self.cursor = cursor;
        self.terminal_at = Some(cursor);
    }

    /// Effects of one key event followed by a cursor sync.
    pub fn frame(&mut self, effects: &[RenderEffect], cursor: Cursor) -> Writer {
        let mut w = Writer::new();
        self.apply(&mut w, effects);
        self.sync_cursor(&mut w, cursor);
        w
    }

    fn put_char(&mut self, w: &mut Writer, ch: char) {
        let at = self.cursor;
        self.cursor.advance(ch, self.screen, self.tab_width);
        let cells = match ch {
            '\n' | '\r' => {
                // nothing drawn; the next print re-positions explicitly
                return;
            }
            '\t' => {
                let cells = if self.cursor.row == at.row && self.cursor.col > at.col {
                    self.cursor.col - at.col
                } else {
                    self.screen.cols() - at.col
                };
                self.print_at(w, at, &" ".repeat(usize::from(cells)));
                cells
            }
            c if c.is_control() => {
                self.print_at(w, at, "?");
                1
            }
            c => {
                let mut tmp = [0u8; 4];
                self.print_at(w, at, c.encode_utf8(&mut tmp));
                1
            }
        };
        let end = at.col + cells;
        self.terminal_at = (end <= self.screen.last_col()).then(|| Cursor::new(at.row, end));
    }

    fn print_at(&self, w: &mut Writer, at: Cursor, text: &str) {
        if self.terminal_at != Some(at) {
            w.move_to(at.col, at.row);
        }
        w.print(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::Command;
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer {
        let mut r = Renderer::new(ScreenSize::new(3, 6), 4);
        let mut w = Writer::new();
        r.begin_full(&mut w);
        r
    }

    #[test]
    fn contiguous_chars_batch_into_one_print() {
        let mut r = renderer();
        let w = r.frame(
            &[RenderEffect::PutChar('a'), RenderEffect::PutChar('b')],
            Cursor::new(0, 2),
        );
        assert_eq!(w.commands(), &[Command::Print("ab".into())]);
    }

    #[test]
    fn newline_repositions_next_print() {
        let mut r = renderer();
        let w = r.frame(
            &[
                RenderEffect::PutChar('a'),
                RenderEffect::PutChar('\n'),
                RenderEffect::PutChar('b'),
            ],
            Cursor::new(1, 1),
        );
        assert_eq!(
            w.commands(),
            &[
                Command::Print("a".into()),
                Command::MoveTo(0, 1),
                Command::Print("b".into()),
            ]
        );
    }

    #[test]
    fn tab_expands_to_next_stop() {
        let mut r = renderer();
        let w = r.frame(
            &[RenderEffect::PutChar('x'), RenderEffect::PutChar('\t')],
            Cursor::new(0, 4),
        );
        assert_eq!(w.commands(), &[Command::Print("x   ".into())]);
    }

    #[test]
    fn control_chars_render_as_placeholder() {
        let mut r = renderer();
        let w = r.frame(&[RenderEffect::PutChar('\u{1b}')], Cursor::new(0, 1));
        assert_eq!(w.commands(), &[Command::Print("?".into())]);
    }

    #[test]
    fn delete_blanks_cell_and_parks_there() {
        let mut r = renderer();
        let w = r.frame(
            &[RenderEffect::DeleteCharAt { row: 1, col: 5 }],
            Cursor::new(1, 5),
        );
        assert_eq!(
            w.commands(),
            &[
                Command::MoveTo(5, 1),
                Command::Print(" ".into()),
                Command::MoveTo(5, 1),
            ]
        );
    }

    #[test]
    fn printing_into_last_column_forces_explicit_sync() {
        let mut r = renderer();
        let effects: Vec<_> = "abcdef".chars().map(RenderEffect::PutChar).collect();
        let w = r.frame(&effects, Cursor::new(1, 0));
        assert_eq!(
            w.commands(),
            &[Command::Print("abcdef".into()), Command::MoveTo(0, 1)]
        );
        assert_eq!(r.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn move_cursor_to_current_position_is_elided() {
        let mut r = renderer();
        let w = r.frame(&[RenderEffect::MoveCursor { row: 0, col: 0 }], Cursor::origin());
        assert!(w.is_empty());
        let w = r.frame(&[RenderEffect::MoveCursor { row: 2, col: 3 }], Cursor::new(2, 3));
        assert_eq!(w.commands(), &[Command::MoveTo(3, 2)]);
    }

    #[test]
    fn resize_forgets_terminal_position() {
        let mut r = renderer();
        r.resize(ScreenSize::new(2, 2));
        let w = r.frame(&[], Cursor::origin());
        assert_eq!(w.commands(), &[Command::MoveTo(0, 0)]);
    }
}
