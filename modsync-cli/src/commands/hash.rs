//! `modsync hash` — print a file digest the way the reconciler computes it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use modsync_core::{hash, HashAlgorithm};

/// Arguments for `modsync hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    pub file: PathBuf,

    /// Digest algorithm: sha1, sha256 or md5.
    #[arg(long, short = 'a', default_value = "sha1")]
    pub algorithm: String,
}

impl HashArgs {
    pub fn run(self) -> Result<()> {
        let algorithm = HashAlgorithm::from_name(&self.algorithm);
        if !algorithm.is_supported() {
            bail!(
                "unknown hash algorithm '{}'; expected: sha1, sha256, md5",
                self.algorithm
            );
        }
        let digest = hash::digest_file(&self.file, algorithm)
            .with_context(|| format!("failed to hash {}", self.file.display()))?;
        println!("{digest}  {}", self.file.display());
        Ok(())
    }
}
