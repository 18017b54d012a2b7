use core_render::{Command, Renderer, Writer};
use core_state::{Cursor, RenderEffect, ScreenSize};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn printed(w: &Writer) -> String {
    w.commands()
        .iter()
        .filter_map(|c| match c {
            Command::Print(s) => Some(s.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn full_repaint_starts_with_clear() {
    let screen = ScreenSize::new(4, 20);
    let mut r = Renderer::new(screen, 8);
    let mut w = Writer::new();
    r.begin_full(&mut w);
    let effects: Vec<_> = "hi\nyo".chars().map(RenderEffect::PutChar).collect();
    r.apply(&mut w, &effects);
    r.sync_cursor(&mut w, Cursor::new(1, 2));
    assert_eq!(
        w.commands(),
        &[
            Command::ClearAll,
            Command::Print("hi".into()),
            Command::MoveTo(0, 1),
            Command::Print("yo".into()),
        ]
    );
}

#[test]
fn typing_then_backspace_blanks_last_cell() {
    let screen = ScreenSize::new(4, 20);
    let mut r = Renderer::new(screen, 8);
    let mut w = Writer::new();
    r.begin_full(&mut w);
    r.apply(&mut w, &[RenderEffect::PutChar('a'), RenderEffect::PutChar('b')]);
    let w = r.frame(&[RenderEffect::DeleteCharAt { row: 0, col: 1 }], Cursor::new(0, 1));
    assert_eq!(
        w.commands(),
        &[
            Command::MoveTo(1, 0),
            Command::Print(" ".into()),
            Command::MoveTo(1, 0),
        ]
    );
}

proptest! {
    // The mirrored cursor follows the same advance rules as the session.
    #[test]
    fn mirror_tracks_cursor_advance(
        text in "[a-z \t\n]{0,120}",
        rows in 1u16..6,
        cols in 1u16..12,
        tab in 1u16..9,
    ) {
        let screen = ScreenSize::new(rows, cols);
        let mut r = Renderer::new(screen, tab);
        let mut w = Writer::new();
        r.begin_full(&mut w);
        let mut expected = Cursor::origin();
        for ch in text.chars() {
            expected.advance(ch, screen, tab);
            r.apply(&mut w, &[RenderEffect::PutChar(ch)]);
        }
        prop_assert_eq!(r.cursor(), expected);
        prop_assert!(printed(&w).chars().all(|c| c != '\n' && c != '\t'));
    }
}
