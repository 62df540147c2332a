//! In-memory [`Fetcher`] for tests and offline runs.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use modsync_providers::ProviderError;

use crate::error::TransferError;
use crate::transfer::Fetcher;

/// Serves canned bodies by URL and records every URL it is asked for.
///
/// Clones share state, so a test can keep one handle while the engine owns
/// another. Unknown URLs answer like an HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    bodies: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MemoryFetcher {
    pub fn with(self, url: &str, body: &[u8]) -> Self {
        lock(&self.bodies).insert(url.to_owned(), body.to_vec());
        self
    }

    /// URLs opened so far, in order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl Fetcher for MemoryFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, TransferError> {
        lock(&self.calls).push(url.to_owned());
        match lock(&self.bodies).get(url) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
            None => Err(TransferError::Request(ProviderError::Status {
                url: url.to_owned(),
                code: 404,
            })),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
