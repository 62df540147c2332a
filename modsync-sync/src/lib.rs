//! # modsync-sync
//!
//! Reconciles a mods directory against a list of [`ModDescriptor`]s.
//!
//! Build a [`ModSync`] for a directory, register descriptors directly with
//! [`ModSync::add`] or from a manifest with [`ModSync::load_from_manifest`],
//! then call [`ModSync::synchronize`].
//!
//! [`ModDescriptor`]: modsync_core::ModDescriptor

pub mod engine;
pub mod error;
pub mod observer;
pub mod reconcile;
pub mod report;
pub mod testing;
pub mod transfer;

pub use engine::{ModSync, SyncOptions};
pub use error::{ReconcileError, SyncError, TransferError};
pub use observer::{NoopObserver, SyncEvent, SyncObserver};
pub use reconcile::{update, UpdateOutcome};
pub use report::{
    DescriptorOutcome, DescriptorReport, FailureReason, IngestFailure, IngestReport,
    RemovalFailure, SyncReport,
};
pub use transfer::{download_to, Fetcher, HttpFetcher};
