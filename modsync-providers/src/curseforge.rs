//! CurseForge, through the `api.curse.tools` proxy.
//!
//! Entry shape: `{ "projectId": "223794", "fileId": "5565729" }`.
//! Request: `GET {endpoint}/mods/{projectId}/files/{fileId}`.

use serde::Deserialize;
use serde_json::Value;

use modsync_core::{HashAlgorithm, ModDescriptor};

use crate::adapter::{id_field, join_url, ProviderAdapter};
use crate::error::ProviderError;
use crate::http::HttpClient;

pub const KEY: &str = "curseforge";

#[derive(Debug, Clone)]
pub struct CurseForge {
    client: HttpClient,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct FileEnvelope {
    data: FileData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    file_name: String,
    #[serde(default)]
    hashes: Vec<FileHash>,
    download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FileHash {
    value: String,
    algo: i64,
}

impl CurseForge {
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn file_url(&self, project_id: &str, file_id: &str) -> String {
        join_url(&self.endpoint, &format!("mods/{project_id}/files/{file_id}"))
    }

    /// Fetch the descriptor for one file of one project.
    pub fn get_mod_file(
        &self,
        project_id: &str,
        file_id: &str,
    ) -> Result<ModDescriptor, ProviderError> {
        let url = self.file_url(project_id, file_id);
        let envelope: FileEnvelope = self.client.get_json(&url)?;
        descriptor_from_file(&url, envelope.data)
    }
}

impl ProviderAdapter for CurseForge {
    fn key(&self) -> &str {
        KEY
    }

    fn resolve(&self, entry: &Value) -> Result<ModDescriptor, ProviderError> {
        let project_id = id_field(KEY, entry, &["projectId", "project_id"])?;
        let file_id = id_field(KEY, entry, &["fileId", "file_id"])?;
        self.get_mod_file(&project_id, &file_id)
    }
}

/// Prefer the first hash whose algorithm we can verify; fall back to the
/// first listed hash with [`HashAlgorithm::None`].
fn descriptor_from_file(url: &str, data: FileData) -> Result<ModDescriptor, ProviderError> {
    let download_url = data
        .download_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ProviderError::MissingField {
            url: url.to_owned(),
            field: "downloadUrl",
        })?;

    let (hash, algorithm) = data
        .hashes
        .iter()
        .map(|h| (h, HashAlgorithm::from_curseforge_code(h.algo)))
        .find(|(_, alg)| alg.is_supported())
        .map(|(h, alg)| (h.value.clone(), alg))
        .or_else(|| data.hashes.first().map(|h| (h.value.clone(), HashAlgorithm::None)))
        .unwrap_or_default();

    Ok(ModDescriptor::new(
        data.file_name,
        hash,
        algorithm,
        download_url,
    ))
}
