use std::io;

/// Errors from snapshot encoding and storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error while creating, writing, reading, or closing a snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The temporary snapshot could not be moved over the destination.
    #[error("failed to replace snapshot file: {0}")]
    Persist(#[source] io::Error),

    /// Bincode encoding or decoding failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The snapshot frame is malformed (bad magic, version, length, or CRC).
    #[error("corrupt snapshot: {reason}")]
    Corrupt { reason: String },
}

impl StoreError {
    /// `true` for failures of the underlying file system, whether while
    /// writing the temporary file or while moving it into place.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Persist(_))
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt {
            reason: reason.into(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
