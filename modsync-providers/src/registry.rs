//! Provider key → adapter lookup.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use modsync_core::{Config, ModDescriptor};

use crate::adapter::ProviderAdapter;
use crate::curseforge::CurseForge;
use crate::error::ProviderError;
use crate::http::HttpClient;
use crate::modrinth::Modrinth;

/// Adapters keyed by the manifest group they handle.
///
/// Adding a provider means registering an adapter; ingestion never
/// branches on provider names.
#[derive(Default)]
pub struct ProviderRegistry {
    adapters: BTreeMap<String, Box<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// CurseForge and Modrinth, sharing one HTTP client built from `config`.
    pub fn with_defaults(config: &Config) -> Self {
        let client = HttpClient::new(&config.http);
        let mut registry = Self::new();
        registry.register(Box::new(CurseForge::new(
            client.clone(),
            config.providers.curseforge_endpoint.clone(),
        )));
        registry.register(Box::new(Modrinth::new(
            client,
            config.providers.modrinth_endpoint.clone(),
        )));
        registry
    }

    /// Register `adapter` under its own key, returning any adapter it replaces.
    pub fn register(
        &mut self,
        adapter: Box<dyn ProviderAdapter>,
    ) -> Option<Box<dyn ProviderAdapter>> {
        self.adapters.insert(adapter.key().to_owned(), adapter)
    }

    pub fn get(&self, key: &str) -> Option<&dyn ProviderAdapter> {
        self.adapters.get(key).map(|a| a.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.adapters.keys().map(String::as_str)
    }

    /// Resolve `entry` with the adapter registered under `key`.
    pub fn resolve(&self, key: &str, entry: &Value) -> Result<ModDescriptor, ProviderError> {
        let adapter = self.get(key).ok_or_else(|| ProviderError::UnknownProvider {
            key: key.to_owned(),
        })?;
        adapter.resolve(entry)
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("keys", &self.adapters.keys().collect::<Vec<_>>())
            .finish()
    }
}
