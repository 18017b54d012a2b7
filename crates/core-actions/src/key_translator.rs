//! Key translation: logical terminal keys to session actions.
//!
//! Only printable ASCII and the whitespace characters the cursor model knows
//! how to advance over (`' '`, `'\t'`, `'\n'`, `'\r'`) become inserts; every
//! other character is `Unhandled`. Control chords map to commands.

use crate::Action;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::Direction;

pub fn translate_key(key: &KeyEvent) -> Action {
    let action = if key.mods.contains(KeyModifiers::CTRL) {
        translate_ctrl(key.code)
    } else if key.mods.contains(KeyModifiers::ALT) {
        Action::Unhandled
    } else {
        translate_plain(key.code)
    };
    tracing::trace!(target: "actions.translate", mods = ?key.mods, action = action.label(), "translated");
    action
}

fn translate_ctrl(code: KeyCode) -> Action {
    match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'c' => Action::Quit,
            's' => Action::Save,
            // ^H is what many terminals send for backspace
            'h' => Action::Backspace,
            _ => Action::Unhandled,
        },
        _ => Action::Unhandled,
    }
}

fn translate_plain(code: KeyCode) -> Action {
    match code {
        KeyCode::Char(c) if is_insertable(c) => Action::Insert(c),
        KeyCode::Char(_) | KeyCode::Esc => Action::Unhandled,
        KeyCode::Enter => Action::Insert('\n'),
        KeyCode::Tab => Action::Insert('\t'),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Left => Action::Move(Direction::Left),
        KeyCode::Right => Action::Move(Direction::Right),
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
    }
}

fn is_insertable(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r')
}
