//! Terminal writer: an ordered list of primitive terminal operations flushed
//! in one go.
//!
//! Invariants:
//! * Commands preserve ordering; nothing reaches the terminal before `flush`.
//! * Positions are absolute, (0,0) origin, already clamped by the caller.
//! * Consecutive prints are merged into a single `Print` command.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// (column, row), crossterm ordering.
    MoveTo(u16, u16),
    ClearAll,
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_all(&mut self) {
        self.cmds.push(Command::ClearAll);
    }

    pub fn print(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if let Some(Command::Print(pending)) = self.cmds.last_mut() {
            pending.push_str(s);
        } else {
            self.cmds.push(Command::Print(s.to_string()));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Write everything to stdout and flush.
    pub fn flush(self) -> Result<()> {
        let mut out = stdout().lock();
        self.flush_to(&mut out)
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        let count = self.cmds.len();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearAll => queue!(out, Clear(ClearType::All), MoveTo(0, 0))?,
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        tracing::trace!(target: "render.writer", commands = count, "flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_prints_are_merged() {
        let mut w = Writer::new();
        w.print("a");
        w.print("");
        w.print("bc");
        w.move_to(1, 2);
        w.print("d");
        assert_eq!(
            w.commands(),
            &[
                Command::Print("abc".into()),
                Command::MoveTo(1, 2),
                Command::Print("d".into()),
            ]
        );
    }

    #[test]
    fn flush_emits_escape_sequences_in_order() {
        let mut w = Writer::new();
        w.move_to(3, 1);
        w.print("hi");
        let mut out = Vec::new();
        w.flush_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // CSI row;col H is 1-based
        let move_at = text.find("\x1b[2;4H").expect("cursor move emitted");
        let print_at = text.find("hi").expect("text emitted");
        assert!(move_at < print_at);
    }
}
