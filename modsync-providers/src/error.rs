//! Error types for modsync-providers.

use thiserror::Error;

/// Why a manifest entry could not be resolved into a descriptor.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The entry is missing identifiers or they have the wrong shape.
    #[error("invalid {provider} entry: {message}")]
    InvalidEntry { provider: String, message: String },

    /// No adapter is registered under this manifest key.
    #[error("no provider registered for '{key}'")]
    UnknownProvider { key: String },

    /// The API answered with a non-success status.
    #[error("GET {url} returned HTTP {code}")]
    Status { url: String, code: u16 },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body was not the JSON we expected.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The response decoded but lacks something a descriptor needs.
    #[error("response from {url} has no {field}")]
    MissingField { url: String, field: &'static str },
}

impl ProviderError {
    pub(crate) fn invalid(provider: &str, message: impl Into<String>) -> Self {
        ProviderError::InvalidEntry {
            provider: provider.to_owned(),
            message: message.into(),
        }
    }
}

/// Convert a `ureq` failure for `url` into a [`ProviderError`].
pub(crate) fn request_err(url: &str, err: ureq::Error) -> ProviderError {
    match err {
        ureq::Error::Status(code, _) => ProviderError::Status {
            url: url.to_owned(),
            code,
        },
        ureq::Error::Transport(transport) => ProviderError::Transport {
            url: url.to_owned(),
            source: Box::new(transport),
        },
    }
}
