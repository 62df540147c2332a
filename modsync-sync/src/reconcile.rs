//! Single-descriptor reconciliation.
//!
//! ## `update` protocol
//!
//! 1. Refuse verification for descriptors without a supported algorithm.
//! 2. Refuse filenames that would leave the target directory.
//! 3. Missing file → fetch.
//! 4. Present file: with `verify_hash`, hash it and fetch on mismatch;
//!    without, trust it as-is.
//! 5. After a verified fetch, hash the new file and report a mismatch.

use std::path::Path;

use modsync_core::{fs, hash, ModDescriptor};

use crate::error::ReconcileError;
use crate::transfer::{download_to, Fetcher};

/// What `update` did to the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The existing file was kept.
    Unchanged,
    /// The file was (re)downloaded.
    Fetched,
}

/// Bring `descriptor`'s file in `target_dir` up to date.
///
/// With `verify_hash == false` an existing file is considered current
/// whatever its content.
pub fn update(
    descriptor: &ModDescriptor,
    target_dir: &Path,
    verify_hash: bool,
    fetcher: &dyn Fetcher,
) -> Result<UpdateOutcome, ReconcileError> {
    let filename = descriptor.filename();
    let algorithm = descriptor.hash_algorithm();

    if verify_hash && !algorithm.is_supported() {
        return Err(ReconcileError::UnsupportedHashAlgorithm {
            filename: filename.to_owned(),
        });
    }
    if !descriptor.has_safe_filename() {
        return Err(ReconcileError::InvalidFilename {
            filename: filename.to_owned(),
        });
    }

    let path = target_dir.join(filename);
    let needs_fetch = if !fs::exists(&path) {
        tracing::debug!("missing: {}", path.display());
        true
    } else if verify_hash {
        let actual = hash::digest_file(&path, algorithm)?;
        let stale = actual != descriptor.expected_hash();
        if stale {
            tracing::debug!("hash mismatch, refetching: {}", path.display());
        }
        stale
    } else {
        false
    };

    if !needs_fetch {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(UpdateOutcome::Unchanged);
    }

    let bytes = download_to(fetcher, descriptor.source_url(), &path)?;
    tracing::info!("fetched {bytes} bytes: {}", path.display());

    if verify_hash {
        let actual = hash::digest_file(&path, algorithm)?;
        if actual != descriptor.expected_hash() {
            return Err(ReconcileError::HashMismatch {
                filename: filename.to_owned(),
                expected: descriptor.expected_hash().to_owned(),
                actual,
            });
        }
    }

    Ok(UpdateOutcome::Fetched)
}
