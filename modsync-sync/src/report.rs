//! Structured results of ingestion and synchronization runs.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Coarse category of a per-descriptor failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// A local file vanished while being inspected.
    NotFound,
    HashMismatch,
    UnsupportedHashAlgorithm,
    /// Network or HTTP-level failure.
    Transport,
    /// Permission or other local I/O failure.
    FileSystem,
}

/// What happened to one descriptor during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DescriptorOutcome {
    /// The file was present (and matched, when verified); nothing was written.
    Unchanged,
    /// The file was downloaded.
    Fetched,
    Failed {
        reason: FailureReason,
        message: String,
    },
}

impl DescriptorOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DescriptorOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorReport {
    pub filename: String,
    pub outcome: DescriptorOutcome,
}

/// An unlisted file that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalFailure {
    pub filename: String,
    pub message: String,
}

/// Outcome of one `synchronize` call.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub directory: PathBuf,
    pub started_at: DateTime<Utc>,
    /// The target directory did not exist and was created by this run.
    pub directory_created: bool,
    /// One entry per descriptor, in processing order.
    pub descriptors: Vec<DescriptorReport>,
    /// Unlisted files deleted by this run, sorted.
    pub removed: Vec<String>,
    pub removal_failures: Vec<RemovalFailure>,
}

impl SyncReport {
    pub fn fetched_count(&self) -> usize {
        self.count(|o| matches!(o, DescriptorOutcome::Fetched))
    }

    pub fn unchanged_count(&self) -> usize {
        self.count(|o| matches!(o, DescriptorOutcome::Unchanged))
    }

    pub fn failed_count(&self) -> usize {
        self.count(DescriptorOutcome::is_failure)
    }

    /// No descriptor failed and every unlisted-file deletion succeeded.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0 && self.removal_failures.is_empty()
    }

    fn count(&self, pred: impl Fn(&DescriptorOutcome) -> bool) -> usize {
        self.descriptors.iter().filter(|d| pred(&d.outcome)).count()
    }
}

/// A manifest entry that could not be turned into a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestFailure {
    pub provider: String,
    /// Position of the entry within its provider group.
    pub index: usize,
    pub entry: Value,
    pub message: String,
}

/// Outcome of `load_from_manifest`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    pub added: usize,
    pub failures: Vec<IngestFailure>,
}
