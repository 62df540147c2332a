//! The synchronization engine.
//!
//! ## `synchronize` protocol
//!
//! 1. Ensure the target directory exists.
//! 2. Snapshot the exact names of the top-level files already present.
//! 3. Reconcile each descriptor, in insertion order, one at a time; a
//!    successful descriptor claims its filename from the snapshot.
//! 4. With `remove_unlisted`, delete every unclaimed name from the snapshot.
//!    A name that vanished in the meantime is skipped, not reported.
//!
//! Descriptors run sequentially on the calling thread. Observer events and
//! file writes follow insertion order, so when two descriptors share a
//! filename the later one determines the final content. Files created by
//! someone else during a run are not in the snapshot and are never deleted.
//! One run per directory at a time is assumed.

use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use chrono::Utc;

use modsync_core::{fs, Manifest, ModDescriptor};
use modsync_providers::ProviderRegistry;

use crate::error::SyncError;
use crate::observer::{NoopObserver, SyncEvent, SyncObserver};
use crate::reconcile::{update, UpdateOutcome};
use crate::report::{
    DescriptorOutcome, DescriptorReport, IngestFailure, IngestReport, RemovalFailure, SyncReport,
};
use crate::transfer::{Fetcher, HttpFetcher};

/// Flags for one synchronization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Hash existing files and refetch on mismatch; verify fresh downloads.
    pub verify_hash: bool,
    /// Delete files in the directory that no descriptor accounts for.
    pub remove_unlisted: bool,
}

/// Desired state for one mods directory.
pub struct ModSync {
    target_dir: PathBuf,
    descriptors: Vec<ModDescriptor>,
    fetcher: Box<dyn Fetcher>,
}

impl ModSync {
    /// Engine for `target_dir`, downloading over HTTP with default settings.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self::with_fetcher(target_dir, Box::new(HttpFetcher::default()))
    }

    pub fn with_fetcher(target_dir: impl Into<PathBuf>, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            target_dir: target_dir.into(),
            descriptors: Vec::new(),
            fetcher,
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Registered descriptors, in processing order.
    pub fn descriptors(&self) -> &[ModDescriptor] {
        &self.descriptors
    }

    /// Register a descriptor. Duplicates are kept and processed in turn.
    pub fn add(&mut self, descriptor: ModDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Resolve every manifest entry through `providers` and register the
    /// results.
    ///
    /// An entry that cannot be resolved is logged and recorded in the
    /// report; the remaining entries are still processed.
    pub fn load_from_manifest(
        &mut self,
        manifest: &Manifest,
        providers: &ProviderRegistry,
    ) -> IngestReport {
        let mut report = IngestReport::default();
        for (provider, index, entry) in manifest.entries() {
            match providers.resolve(provider, entry) {
                Ok(descriptor) => {
                    tracing::debug!("resolved {provider}[{index}]: {descriptor}");
                    self.add(descriptor);
                    report.added += 1;
                }
                Err(err) => {
                    tracing::warn!(provider, index, error = %err, "skipping manifest entry");
                    report.failures.push(IngestFailure {
                        provider: provider.to_owned(),
                        index,
                        entry: entry.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Run a synchronization without an observer.
    pub fn synchronize(&self, options: SyncOptions) -> Result<SyncReport, SyncError> {
        self.synchronize_with(options, &NoopObserver)
    }

    /// Run a synchronization, reporting progress to `observer`.
    ///
    /// Only directory-level failures abort the run; per-descriptor and
    /// deletion failures are recorded in the returned report.
    pub fn synchronize_with(
        &self,
        options: SyncOptions,
        observer: &dyn SyncObserver,
    ) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();
        let dir = self.target_dir.as_path();

        // Step 1: ensure the directory.
        if dir.exists() && !dir.is_dir() {
            return Err(SyncError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        let directory_created = fs::ensure_dir(dir).map_err(SyncError::CreateDirectory)?;
        if directory_created {
            tracing::info!("created mods directory: {}", dir.display());
            observer.on_event(&SyncEvent::DirectoryCreated { path: dir });
        }

        // Step 2: snapshot what is there now.
        let mut unclaimed: BTreeSet<OsString> = fs::file_names(dir)
            .map_err(SyncError::ListDirectory)?
            .into_iter()
            .collect();

        // Step 3: reconcile in insertion order.
        let total = self.descriptors.len();
        let mut descriptors = Vec::with_capacity(total);
        for (index, descriptor) in self.descriptors.iter().enumerate() {
            let filename = descriptor.filename();
            observer.on_event(&SyncEvent::Progress {
                index,
                total,
                filename,
            });

            let result = update(descriptor, dir, options.verify_hash, self.fetcher.as_ref());
            let outcome = match result {
                Ok(updated) => {
                    unclaimed.remove(OsStr::new(filename));
                    match updated {
                        UpdateOutcome::Unchanged => DescriptorOutcome::Unchanged,
                        UpdateOutcome::Fetched => DescriptorOutcome::Fetched,
                    }
                }
                Err(err) => {
                    tracing::warn!(filename, error = %err, "mod update failed");
                    DescriptorOutcome::Failed {
                        reason: err.reason(),
                        message: err.to_string(),
                    }
                }
            };

            observer.on_event(&SyncEvent::DescriptorFinished {
                index,
                filename,
                outcome: &outcome,
            });
            descriptors.push(DescriptorReport {
                filename: filename.to_owned(),
                outcome,
            });
        }

        // Step 4: delete unlisted files.
        let mut removed = Vec::new();
        let mut removal_failures = Vec::new();
        if options.remove_unlisted {
            for name in unclaimed {
                let filename = name.to_string_lossy().into_owned();
                match fs::remove_if_exists(&dir.join(&name)) {
                    Ok(true) => {
                        tracing::info!("removed unlisted file: {filename}");
                        observer.on_event(&SyncEvent::Removed {
                            filename: &filename,
                        });
                        removed.push(filename);
                    }
                    Ok(false) => {
                        tracing::debug!("unlisted file already gone: {filename}");
                    }
                    Err(err) => {
                        let message = err.to_string();
                        tracing::warn!(
                            filename = %filename,
                            error = %message,
                            "could not remove unlisted file"
                        );
                        observer.on_event(&SyncEvent::RemoveFailed {
                            filename: &filename,
                            message: &message,
                        });
                        removal_failures.push(RemovalFailure { filename, message });
                    }
                }
            }
        }

        Ok(SyncReport {
            directory: dir.to_path_buf(),
            started_at,
            directory_created,
            descriptors,
            removed,
            removal_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFetcher;
    use modsync_core::HashAlgorithm;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const ABC_SHA1: &str = "a9993e364706816aba3e25717850c26c9cd0d89d";
    const V1_SHA1: &str = "5a6df720540c20d95d530d3fd6885511223d5d20";
    const V2_SHA1: &str = "a1047eab1035d58682a53557e0b2a75edbfd15fd";

    fn engine(dir: &Path, fetcher: &MemoryFetcher) -> ModSync {
        ModSync::with_fetcher(dir, Box::new(fetcher.clone()))
    }

    #[test]
    fn creates_missing_directory_and_reports_it() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".minecraft").join("mods");
        let fetcher = MemoryFetcher::default();

        let report = engine(&dir, &fetcher).synchronize(SyncOptions::default()).unwrap();
        assert!(report.directory_created);
        assert!(dir.is_dir());

        let again = engine(&dir, &fetcher).synchronize(SyncOptions::default()).unwrap();
        assert!(!again.directory_created);
    }

    #[test]
    fn target_that_is_a_file_aborts() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("mods");
        std::fs::write(&file, "not a dir").unwrap();

        let err = engine(&file, &MemoryFetcher::default())
            .synchronize(SyncOptions::default())
            .unwrap_err();
        assert!(matches!(err, SyncError::NotADirectory { .. }), "got: {err}");
    }

    #[test]
    fn observer_sees_progress_in_insertion_order() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MemoryFetcher::default()
            .with("mem://a", b"a")
            .with("mem://b", b"b");
        let mut sync = engine(tmp.path(), &fetcher);
        sync.add(ModDescriptor::new("b.jar", "", HashAlgorithm::None, "mem://b"));
        sync.add(ModDescriptor::new("a.jar", "", HashAlgorithm::None, "mem://a"));

        let seen = RefCell::new(Vec::new());
        let observer = |event: &SyncEvent<'_>| {
            if let SyncEvent::Progress {
                index,
                total,
                filename,
            } = event
            {
                seen.borrow_mut().push((*index, *total, filename.to_string()));
            }
        };
        sync.synchronize_with(SyncOptions::default(), &observer).unwrap();

        assert_eq!(
            seen.into_inner(),
            vec![(0, 2, "b.jar".to_string()), (1, 2, "a.jar".to_string())]
        );
        assert_eq!(fetcher.calls(), vec!["mem://b", "mem://a"]);
    }

    #[test]
    fn failing_descriptor_does_not_stop_the_rest() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MemoryFetcher::default().with("mem://abc", b"abc");
        let mut sync = engine(tmp.path(), &fetcher);
        sync.add(ModDescriptor::new("gone.jar", "", HashAlgorithm::None, "mem://gone"));
        sync.add(ModDescriptor::new("abc.jar", ABC_SHA1, HashAlgorithm::Sha1, "mem://abc"));

        let report = sync
            .synchronize(SyncOptions {
                verify_hash: true,
                remove_unlisted: false,
            })
            .unwrap();

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.fetched_count(), 1);
        assert!(!report.is_success());
        assert!(tmp.path().join("abc.jar").exists());
    }

    #[test]
    fn failed_descriptor_does_not_protect_its_stale_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("stale.jar"), "old").unwrap();
        let mut sync = engine(tmp.path(), &MemoryFetcher::default());
        sync.add(ModDescriptor::new("stale.jar", "", HashAlgorithm::None, "mem://stale"));

        let report = sync
            .synchronize(SyncOptions {
                verify_hash: true,
                remove_unlisted: true,
            })
            .unwrap();

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.removed, vec!["stale.jar"]);
    }

    #[test]
    fn duplicate_filenames_last_descriptor_wins_and_is_protected() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MemoryFetcher::default()
            .with("mem://v1", b"v1")
            .with("mem://v2", b"v2");
        let mut sync = engine(tmp.path(), &fetcher);
        sync.add(ModDescriptor::new("dup.jar", V1_SHA1, HashAlgorithm::Sha1, "mem://v1"));
        sync.add(ModDescriptor::new("dup.jar", V2_SHA1, HashAlgorithm::Sha1, "mem://v2"));

        let report = sync
            .synchronize(SyncOptions {
                verify_hash: true,
                remove_unlisted: true,
            })
            .unwrap();

        assert_eq!(report.descriptors.len(), 2);
        assert_eq!(report.fetched_count(), 2);
        assert!(report.removed.is_empty());
        assert_eq!(std::fs::read(tmp.path().join("dup.jar")).unwrap(), b"v2");
        assert_eq!(fetcher.calls(), vec!["mem://v1", "mem://v2"]);
    }
}
