//! Streaming downloads.
//!
//! ## `download_to` protocol
//!
//! 1. Open the remote stream (nothing touches disk if this fails).
//! 2. Copy it into `<dest>.modsync.tmp`.
//! 3. Rename over `dest`, replacing any previous file.
//!
//! A failure in 2 or 3 removes the temporary file and leaves `dest` as it was.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use modsync_core::config::HttpConfig;
use modsync_providers::HttpClient;

use crate::error::{io_err, TransferError};

/// Source of remote bytes.
pub trait Fetcher {
    /// Open a byte stream for `url`.
    fn open(&self, url: &str) -> Result<Box<dyn Read>, TransferError>;
}

/// [`Fetcher`] backed by the blocking HTTP client used for API calls.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: HttpClient,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            client: HttpClient::new(config),
        }
    }

    /// Share the agent (and its connection pool) of an API client.
    pub fn from_client(client: &HttpClient) -> Self {
        Self {
            client: client.clone(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl Fetcher for HttpFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read>, TransferError> {
        let stream: Box<dyn Read> = self.client.open(url)?;
        Ok(stream)
    }
}

/// `<dest>.modsync.tmp`
pub fn tmp_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".modsync.tmp");
    PathBuf::from(name)
}

/// Stream `url` into `dest`, replacing it. Returns the number of bytes written.
pub fn download_to(fetcher: &dyn Fetcher, url: &str, dest: &Path) -> Result<u64, TransferError> {
    let mut reader = fetcher.open(url)?;
    let tmp = tmp_path(dest);

    let written = match copy_into(&mut reader, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&tmp, e));
        }
    };

    if let Err(e) = std::fs::rename(&tmp, dest) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(dest, e));
    }
    Ok(written)
}

fn copy_into(reader: &mut dyn Read, path: &Path) -> io::Result<u64> {
    let mut file = File::create(path)?;
    let written = io::copy(reader, &mut file)?;
    file.sync_all()?;
    Ok(written)
}
