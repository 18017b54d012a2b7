//! File IO for the session's backing document.
//!
//! Synchronous and minimal: the whole file is read once at startup and
//! rewritten in full on every save. The [`DocumentStore`] trait is the seam
//! the session persists through, so tests can swap the file system out.

use core_state::EditorError;
use core_text::Buffer;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Where the session's document comes from and goes back to.
pub trait DocumentStore {
    /// Load the initial buffer.
    fn load(&self) -> Result<Buffer, EditorError>;
    /// Replace the stored document with `contents`.
    fn store(&mut self, contents: &str) -> Result<(), EditorError>;
}

/// File-backed store for a single path.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Buffer, EditorError> {
        open_file(&self.path)
    }

    fn store(&mut self, contents: &str) -> Result<(), EditorError> {
        write_file(&self.path, contents)
    }
}

/// Read `path` into a new buffer. A missing file is created empty and
/// yields an empty buffer; content must be valid UTF-8.
pub fn open_file(path: &Path) -> Result<Buffer, EditorError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::File::create(path).map_err(|e| {
                tracing::error!(target: "io", file = %path.display(), ?e, "file_create_error");
                EditorError::io("create", path, e)
            })?;
            tracing::info!(target: "io", file = %path.display(), "file_created_empty");
            return Ok(Buffer::new());
        }
        Err(e) => {
            tracing::error!(target: "io", file = %path.display(), ?e, "file_open_error");
            return Err(EditorError::io("read", path, e));
        }
    };
    let content = String::from_utf8(bytes).map_err(|e| {
        tracing::error!(target: "io", file = %path.display(), valid_up_to = e.utf8_error().valid_up_to(), "file_not_utf8");
        EditorError::io("decode", path, io::Error::new(ErrorKind::InvalidData, e))
    })?;
    let buffer = Buffer::from_str(&content)?;
    tracing::debug!(
        target: "io",
        file = %path.display(),
        size_bytes = content.len(),
        chars = buffer.len(),
        "file_read_ok"
    );
    Ok(buffer)
}

/// Truncate `path` and write `contents` in full.
pub fn write_file(path: &Path, contents: &str) -> Result<(), EditorError> {
    match fs::write(path, contents.as_bytes()) {
        Ok(()) => {
            tracing::info!(target: "io", file = %path.display(), size_bytes = contents.len(), "file_write_ok");
            Ok(())
        }
        Err(e) => {
            tracing::error!(target: "io", file = %path.display(), ?e, "file_write_error");
            Err(EditorError::io("write", path, e))
        }
    }
}
