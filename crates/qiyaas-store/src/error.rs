use std::{io, path::PathBuf};

/// Errors raised while reading or writing puzzle data files.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    /// A file or directory could not be read or created.
    #[display("failed to access {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A file does not hold the expected JSON.
    #[display("invalid JSON in {}: {source}", path.display())]
    Json {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying serialization error.
        source: serde_json::Error,
    },
    /// A temporary file could not be moved over its destination.
    #[display("failed to replace {}: {source}", path.display())]
    Persist {
        /// The destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
