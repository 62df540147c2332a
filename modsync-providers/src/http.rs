//! Shared blocking HTTP client.
//!
//! One [`ureq::Agent`] is built from [`HttpConfig`] and cloned into every
//! adapter, so connection pooling, the User-Agent and the transport timeout
//! are configured in exactly one place.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use serde::de::DeserializeOwned;

use modsync_core::config::HttpConfig;
use modsync_core::Manifest;

use crate::error::{request_err, ProviderError};

/// Build the agent used for API calls and file downloads.
pub fn build_agent(config: &HttpConfig) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build()
}

/// Cheap-to-clone JSON client around a configured agent.
#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            agent: build_agent(config),
        }
    }

    pub fn agent(&self) -> &ureq::Agent {
        &self.agent
    }

    /// GET `url` and decode the body as `T`.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        tracing::debug!(url, "GET");
        let response = self.agent.get(url).call().map_err(|e| request_err(url, e))?;
        response.into_json::<T>().map_err(|source| ProviderError::Decode {
            url: url.to_owned(),
            source,
        })
    }

    /// GET `url` and hand back the body as an unbuffered stream.
    pub fn open(&self, url: &str) -> Result<Box<dyn Read + Send>, ProviderError> {
        tracing::debug!(url, "GET (stream)");
        let response = self.agent.get(url).call().map_err(|e| request_err(url, e))?;
        Ok(Box::new(response.into_reader()))
    }

    /// Download and parse a manifest document.
    pub fn fetch_manifest(&self, url: &str) -> Result<Manifest, ProviderError> {
        self.get_json(url)
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}
