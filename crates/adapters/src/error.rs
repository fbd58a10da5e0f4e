//! Error types for the file sink.

use itrlog_shared::{ErrorCode, ErrorEnvelope, UnexpectedError, normalize_unexpected_error};
use std::io;
use std::path::PathBuf;

/// Failures raised by [`RotatingFileSink`](crate::RotatingFileSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The log folder could not be created.
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// Folder that failed to be created.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The active log file could not be opened.
    #[error("failed to open log file at {path}: {source}")]
    Open {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Renaming the active file to its backup name failed.
    #[error("failed to rotate {path} to {backup}: {source}")]
    Rotate {
        /// Active file.
        path: PathBuf,
        /// Backup name it was being moved to.
        backup: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A single write is larger than the rotation limit.
    #[error("write length {length} exceeds maximum file size {max}")]
    WriteTooLarge {
        /// Bytes in the rejected write.
        length: u64,
        /// Rotation limit in bytes.
        max: u64,
    },

    /// Writing or flushing the active file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<SinkError> for ErrorEnvelope {
    fn from(error: SinkError) -> Self {
        match error {
            SinkError::WriteTooLarge { length, max } => Self::expected(
                ErrorCode::new("sink", "write_too_large"),
                format!("write length {length} exceeds maximum file size {max}"),
            )
            .with_metadata("length", length.to_string())
            .with_metadata("max", max.to_string()),
            SinkError::CreateDirectory { ref path, .. } | SinkError::Open { ref path, .. } => {
                let path = path.display().to_string();
                normalize_unexpected_error(UnexpectedError::error(error)).with_metadata("path", path)
            },
            SinkError::Rotate {
                ref path,
                ref backup,
                ..
            } => {
                let path = path.display().to_string();
                let backup = backup.display().to_string();
                normalize_unexpected_error(UnexpectedError::error(error))
                    .with_metadata("path", path)
                    .with_metadata("backup", backup)
            },
            SinkError::Io(_) => normalize_unexpected_error(UnexpectedError::error(error)),
        }
    }
}
