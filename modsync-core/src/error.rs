//! Error types for modsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from hashing, file-system primitives, manifest
/// parsing and configuration loading.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `NONE` reached the hasher; verification is impossible for this file.
    #[error("unsupported hash algorithm: NONE cannot be used for verification")]
    UnsupportedHashAlgorithm,

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stream could not be read while hashing.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// The manifest document is not valid JSON or has the wrong shape.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Config YAML parse error, includes the file path.
    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

impl CoreError {
    /// True when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
