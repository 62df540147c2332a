//! modsync core library: descriptors, hashing, file-system primitives,
//! manifest documents and configuration.
//!
//! - [`types`] — [`ModDescriptor`] and [`HashAlgorithm`]
//! - [`hash`] — content digests
//! - [`fs`] — directory primitives used by the reconciler
//! - [`manifest`] — the declarative mod list
//! - [`config`] — `~/.modsync/config.yaml`
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod fs;
pub mod hash;
pub mod manifest;
pub mod types;

pub use config::Config;
pub use error::CoreError;
pub use manifest::Manifest;
pub use types::{HashAlgorithm, ModDescriptor};
