//! Run observation.
//!
//! The engine reports progress and diagnostics through a [`SyncObserver`]
//! handed to it by the caller. Closures taking a [`SyncEvent`] are observers.

use std::path::Path;

use crate::report::DescriptorOutcome;

/// Something that happened during a synchronization run.
#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    DirectoryCreated {
        path: &'a Path,
    },
    /// Emitted before descriptor `index` (0-based) of `total` is reconciled.
    Progress {
        index: usize,
        total: usize,
        filename: &'a str,
    },
    DescriptorFinished {
        index: usize,
        filename: &'a str,
        outcome: &'a DescriptorOutcome,
    },
    Removed {
        filename: &'a str,
    },
    RemoveFailed {
        filename: &'a str,
        message: &'a str,
    },
}

pub trait SyncObserver {
    fn on_event(&self, event: &SyncEvent<'_>);
}

impl<F> SyncObserver for F
where
    F: Fn(&SyncEvent<'_>),
{
    fn on_event(&self, event: &SyncEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {
    fn on_event(&self, _event: &SyncEvent<'_>) {}
}
