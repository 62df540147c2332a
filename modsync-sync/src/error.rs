//! Error types for modsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use modsync_core::CoreError;
use modsync_providers::ProviderError;

use crate::report::FailureReason;

/// A download that did not complete.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The request failed or answered with a non-success status.
    #[error(transparent)]
    Request(#[from] ProviderError),

    /// Reading the body or writing the destination failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why reconciling a single descriptor failed.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Verification was requested for a descriptor without a usable algorithm.
    #[error("{filename}: hash verification requested but no supported hash algorithm is known")]
    UnsupportedHashAlgorithm { filename: String },

    /// The freshly downloaded file does not hash to the expected digest.
    #[error("{filename}: downloaded file hashes to {actual}, expected {expected}")]
    HashMismatch {
        filename: String,
        expected: String,
        actual: String,
    },

    /// The filename would resolve outside the target directory.
    #[error("refusing to write '{filename}': not a plain file name")]
    InvalidFilename { filename: String },

    #[error("hashing failed: {0}")]
    Hash(#[from] CoreError),

    #[error("download failed: {0}")]
    Transfer(#[from] TransferError),
}

impl ReconcileError {
    /// Coarse failure category for reports.
    pub fn reason(&self) -> FailureReason {
        match self {
            ReconcileError::UnsupportedHashAlgorithm { .. } => {
                FailureReason::UnsupportedHashAlgorithm
            }
            ReconcileError::HashMismatch { .. } => FailureReason::HashMismatch,
            ReconcileError::InvalidFilename { .. } => FailureReason::FileSystem,
            ReconcileError::Hash(CoreError::UnsupportedHashAlgorithm) => {
                FailureReason::UnsupportedHashAlgorithm
            }
            ReconcileError::Hash(e) if e.is_not_found() => FailureReason::NotFound,
            ReconcileError::Hash(_) => FailureReason::FileSystem,
            ReconcileError::Transfer(TransferError::Io { .. }) => FailureReason::FileSystem,
            ReconcileError::Transfer(_) => FailureReason::Transport,
        }
    }
}

/// Failures that abort a whole synchronization run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("target {path} exists and is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("cannot create target directory: {0}")]
    CreateDirectory(#[source] CoreError),

    #[error("cannot list target directory: {0}")]
    ListDirectory(#[source] CoreError),
}

/// Convenience constructor for [`TransferError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> TransferError {
    TransferError::Io {
        path: path.into(),
        source,
    }
}
