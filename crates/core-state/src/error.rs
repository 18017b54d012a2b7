//! Error taxonomy shared by the session and the runtime.

use core_text::BufferError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every variant is fatal for the session; nothing is retried.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Bad or missing command line arguments. No session is started.
    #[error("incorrect usage: {0}")]
    Usage(String),
    /// Opening, reading or writing the backing file failed.
    #[error("failed to {op} `{}`", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The buffer could not grow.
    #[error(transparent)]
    Resource(#[from] BufferError),
}

impl EditorError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Short label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EditorError::Usage(_) => "usage",
            EditorError::Io { .. } => "io",
            EditorError::Resource(_) => "resource",
        }
    }
}
