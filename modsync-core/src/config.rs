//! User configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.modsync/
//!   config.yaml
//! ```
//!
//! Every field is optional; a missing file yields [`Config::default`].
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};

pub const DEFAULT_USER_AGENT: &str = "modsync/0.1 (+https://github.com/modsync/modsync)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CURSEFORGE_ENDPOINT: &str = "https://api.curse.tools/v1/cf";
pub const DEFAULT_MODRINTH_ENDPOINT: &str = "https://api.modrinth.com/v2";

/// Root of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub providers: ProvidersConfig,
}

/// Settings shared by every outbound request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Transport timeout for a whole request, in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Base URLs of the provider APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub curseforge_endpoint: String,
    pub modrinth_endpoint: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            curseforge_endpoint: DEFAULT_CURSEFORGE_ENDPOINT.to_owned(),
            modrinth_endpoint: DEFAULT_MODRINTH_ENDPOINT.to_owned(),
        }
    }
}

/// `<home>/.modsync/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".modsync").join("config.yaml")
}

/// Load config from `<home>/.modsync/config.yaml`, or defaults if absent.
pub fn load_at(home: &Path) -> Result<Config, CoreError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_from(&path)
}

/// Load config from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<Config, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    // An empty file deserializes to `null`, which serde_yaml rejects for a struct.
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| CoreError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, CoreError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, CoreError> {
    dirs::home_dir().ok_or(CoreError::HomeNotFound)
}
