//! Modrinth.
//!
//! Entry shape: `{ "versionId": "kF3whRqC" }`.
//! Request: `GET {endpoint}/version/{versionId}`.

use serde::Deserialize;
use serde_json::Value;

use modsync_core::{HashAlgorithm, ModDescriptor};

use crate::adapter::{id_field, join_url, ProviderAdapter};
use crate::error::ProviderError;
use crate::http::HttpClient;

pub const KEY: &str = "modrinth";

#[derive(Debug, Clone)]
pub struct Modrinth {
    client: HttpClient,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct Version {
    #[serde(default)]
    files: Vec<VersionFile>,
}

#[derive(Debug, Deserialize)]
struct VersionFile {
    url: String,
    filename: String,
    #[serde(default)]
    primary: bool,
    #[serde(default)]
    hashes: VersionHashes,
}

#[derive(Debug, Default, Deserialize)]
struct VersionHashes {
    sha1: Option<String>,
}

impl Modrinth {
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn version_url(&self, version_id: &str) -> String {
        join_url(&self.endpoint, &format!("version/{version_id}"))
    }

    /// Fetch the descriptor for the primary file of a version.
    pub fn get_mod_file(&self, version_id: &str) -> Result<ModDescriptor, ProviderError> {
        let url = self.version_url(version_id);
        let version: Version = self.client.get_json(&url)?;
        descriptor_from_version(&url, version)
    }
}

impl ProviderAdapter for Modrinth {
    fn key(&self) -> &str {
        KEY
    }

    fn resolve(&self, entry: &Value) -> Result<ModDescriptor, ProviderError> {
        let version_id = id_field(KEY, entry, &["versionId", "version_id"])?;
        self.get_mod_file(&version_id)
    }
}

fn descriptor_from_version(url: &str, version: Version) -> Result<ModDescriptor, ProviderError> {
    let mut files = version.files;
    let index = files.iter().position(|f| f.primary).unwrap_or(0);
    if files.is_empty() {
        return Err(ProviderError::MissingField {
            url: url.to_owned(),
            field: "files",
        });
    }
    let file = files.swap_remove(index);

    let (hash, algorithm) = match file.hashes.sha1 {
        Some(sha1) => (sha1, HashAlgorithm::Sha1),
        None => (String::new(), HashAlgorithm::None),
    };
    Ok(ModDescriptor::new(file.filename, hash, algorithm, file.url))
}
