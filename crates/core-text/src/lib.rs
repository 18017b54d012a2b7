//! Growable text buffer holding the document being edited.
//!
//! The buffer is a single contiguous `String`. Edits only ever touch the end
//! of the sequence (append / pop), so every mutation is amortized O(1).
//! Growth goes through `try_reserve` so an allocation failure is reported as
//! a [`BufferError`] rather than aborting the process mid-edit.

use std::collections::TryReserveError;
use thiserror::Error;

/// Failure raised while growing the buffer.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("failed to allocate {additional} more byte(s) for the text buffer")]
    Alloc {
        additional: usize,
        #[source]
        source: TryReserveError,
    },
}

/// The in-memory document.
///
/// `len` counts characters and always equals `text.chars().count()`; it is
/// tracked separately so length queries stay O(1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    text: String,
    len: usize,
}

impl Buffer {
    /// Empty buffer (new file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a buffer from loaded file contents.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, BufferError> {
        let mut text = String::new();
        text.try_reserve_exact(content.len())
            .map_err(|source| BufferError::Alloc {
                additional: content.len(),
                source,
            })?;
        text.push_str(content);
        Ok(Self {
            len: text.chars().count(),
            text,
        })
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// Append `ch` to the end of the document.
    pub fn insert_append(&mut self, ch: char) -> Result<(), BufferError> {
        let additional = ch.len_utf8();
        self.text
            .try_reserve(additional)
            .map_err(|source| BufferError::Alloc { additional, source })?;
        self.text.push(ch);
        self.len += 1;
        Ok(())
    }

    /// Remove the last character. Returns `None` (and leaves the buffer
    /// untouched) when the buffer is already empty.
    pub fn delete_last(&mut self) -> Option<char> {
        let removed = self.text.pop()?;
        self.len -= 1;
        Some(removed)
    }

    /// Full contents, always reflecting the latest mutation.
    pub fn snapshot(&self) -> &str {
        &self.text
    }
}
