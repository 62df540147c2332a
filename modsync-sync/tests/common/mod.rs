#![allow(dead_code)]

use modsync_core::{HashAlgorithm, ModDescriptor};
use modsync_providers::{ProviderAdapter, ProviderError};
pub use modsync_sync::testing::MemoryFetcher;
use serde_json::Value;

// sha1 of the jar bodies served below.
pub const A_BODY: &[u8] = b"A jar";
pub const B_BODY: &[u8] = b"B jar";
pub const A_SHA1: &str = "9042996e0dd9aa247051260af69ea09b78cd4f90";
pub const B_SHA1: &str = "7c771e67bb615f328fe74f4d4c848b6fd1e3085e";

/// Adapter resolving `{"file": "<name>", "sha1": "<hex>"}` without I/O.
pub struct LocalAdapter;

impl ProviderAdapter for LocalAdapter {
    fn key(&self) -> &str {
        "local"
    }

    fn resolve(&self, entry: &Value) -> Result<ModDescriptor, ProviderError> {
        let field = |name: &str| {
            entry
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| ProviderError::InvalidEntry {
                    provider: "local".to_owned(),
                    message: format!("missing `{name}`"),
                })
        };
        let file = field("file")?;
        let sha1 = field("sha1")?;
        Ok(ModDescriptor::new(
            file.clone(),
            sha1,
            HashAlgorithm::Sha1,
            format!("mem://{file}"),
        ))
    }
}

pub fn a_jar() -> ModDescriptor {
    ModDescriptor::new("A.jar", A_SHA1, HashAlgorithm::Sha1, "mem://A.jar")
}

pub fn b_jar() -> ModDescriptor {
    ModDescriptor::new("B.jar", B_SHA1, HashAlgorithm::Sha1, "mem://B.jar")
}

pub fn fetcher() -> MemoryFetcher {
    MemoryFetcher::default()
        .with("mem://A.jar", A_BODY)
        .with("mem://B.jar", B_BODY)
}
