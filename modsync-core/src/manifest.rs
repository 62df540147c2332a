//! The declarative mod list.
//!
//! ```json
//! {
//!   "mods": {
//!     "curseforge": [ { "projectId": "223794", "fileId": "5565729" } ],
//!     "modrinth":   [ { "versionId": "kF3whRqC" } ]
//!   }
//! }
//! ```
//!
//! Entries are kept as raw JSON; each provider adapter extracts the
//! identifiers it needs. A missing `mods` object or group is simply empty.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{io_err, CoreError};

/// A parsed manifest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Provider key → entries, iterated in key order.
    #[serde(default)]
    pub mods: BTreeMap<String, Vec<Value>>,
}

impl Manifest {
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_json_str(&contents)
    }

    /// Total entries across every provider group.
    pub fn entry_count(&self) -> usize {
        self.mods.values().map(Vec::len).sum()
    }

    /// `(provider, index within group, entry)` in processing order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize, &Value)> {
        self.mods.iter().flat_map(|(provider, entries)| {
            entries
                .iter()
                .enumerate()
                .map(move |(i, entry)| (provider.as_str(), i, entry))
        })
    }
}
