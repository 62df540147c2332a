//! Domain types for modsync.
//!
//! A [`ModDescriptor`] is the normalized unit of desired state: one file the
//! target directory should contain, independent of the provider it came from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Hash algorithm
// ---------------------------------------------------------------------------

/// Digest algorithm a descriptor's expected hash was produced with.
///
/// `None` is a sentinel: the provider did not give us a hash we can check.
/// It must never reach the hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha1,
    Md5,
    #[default]
    None,
}

impl HashAlgorithm {
    /// Map a loose algorithm name (`"SHA1"`, `"sha256"`, ...) to a variant.
    ///
    /// Unknown names map to [`HashAlgorithm::None`]; this never fails.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha256" => HashAlgorithm::Sha256,
            "sha1" => HashAlgorithm::Sha1,
            "md5" => HashAlgorithm::Md5,
            _ => HashAlgorithm::None,
        }
    }

    /// Map a CurseForge `hashes[].algo` code to a variant.
    pub fn from_curseforge_code(code: i64) -> Self {
        match code {
            1 => HashAlgorithm::Sha1,
            2 => HashAlgorithm::Md5,
            _ => HashAlgorithm::None,
        }
    }

    /// Whether files can be verified with this algorithm.
    pub fn is_supported(self) -> bool {
        self != HashAlgorithm::None
    }
}

impl FromStr for HashAlgorithm {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "sha256"),
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Md5 => write!(f, "md5"),
            HashAlgorithm::None => write!(f, "none"),
        }
    }
}

// ---------------------------------------------------------------------------
// Mod descriptor
// ---------------------------------------------------------------------------

/// One file the target directory should contain.
///
/// Immutable once built; reconciling it against a directory never changes
/// the descriptor itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModDescriptor {
    filename: String,
    expected_hash: String,
    hash_algorithm: HashAlgorithm,
    source_url: String,
}

impl ModDescriptor {
    pub fn new(
        filename: impl Into<String>,
        expected_hash: impl Into<String>,
        hash_algorithm: HashAlgorithm,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            expected_hash: expected_hash.into(),
            hash_algorithm,
            source_url: source_url.into(),
        }
    }

    /// File name relative to the target directory.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Hex digest of the authoritative remote copy.
    pub fn expected_hash(&self) -> &str {
        &self.expected_hash
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// A filename is safe when it names exactly one entry inside the target
    /// directory: non-empty, not `.`/`..`, and without path separators.
    pub fn has_safe_filename(&self) -> bool {
        let name = self.filename.as_str();
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\\')
    }
}

impl fmt::Display for ModDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}) <- {}",
            self.filename, self.hash_algorithm, self.expected_hash, self.source_url
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
