//! # modsync-providers
//!
//! Adapters that turn a manifest entry into a [`ModDescriptor`] by asking a
//! mod-hosting API about it.
//!
//! Adapters implement [`ProviderAdapter`] and are looked up by manifest key
//! through a [`ProviderRegistry`]. [`ProviderRegistry::with_defaults`]
//! registers [`CurseForge`] and [`Modrinth`].
//!
//! [`ModDescriptor`]: modsync_core::ModDescriptor

pub mod adapter;
pub mod curseforge;
pub mod error;
pub mod http;
pub mod modrinth;
pub mod registry;

pub use adapter::ProviderAdapter;
pub use curseforge::CurseForge;
pub use error::ProviderError;
pub use http::HttpClient;
pub use modrinth::Modrinth;
pub use registry::ProviderRegistry;
