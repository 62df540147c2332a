//! Content hashing for local mod files.
//!
//! Digests are lowercase hex, matching what CurseForge and Modrinth publish.
//! Files are streamed through the hasher in fixed-size chunks, never read
//! whole into memory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{io_err, CoreError};
use crate::types::HashAlgorithm;

const CHUNK_SIZE: usize = 64 * 1024;

/// Hex digest of the file at `path`.
///
/// Fails with [`CoreError::UnsupportedHashAlgorithm`] for
/// [`HashAlgorithm::None`] before the file is opened.
pub fn digest_file(path: &Path, algorithm: HashAlgorithm) -> Result<String, CoreError> {
    if !algorithm.is_supported() {
        return Err(CoreError::UnsupportedHashAlgorithm);
    }
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    stream_digest(BufReader::new(file), algorithm).map_err(|e| io_err(path, e))
}

/// Hex digest of everything readable from `reader`.
pub fn digest_reader<R: Read>(reader: R, algorithm: HashAlgorithm) -> Result<String, CoreError> {
    if !algorithm.is_supported() {
        return Err(CoreError::UnsupportedHashAlgorithm);
    }
    stream_digest(reader, algorithm).map_err(CoreError::Read)
}

fn stream_digest<R: Read>(reader: R, algorithm: HashAlgorithm) -> std::io::Result<String> {
    match algorithm {
        HashAlgorithm::Sha256 => stream::<Sha256, _>(reader),
        HashAlgorithm::Sha1 => stream::<Sha1, _>(reader),
        HashAlgorithm::Md5 => stream::<Md5, _>(reader),
        HashAlgorithm::None => Err(std::io::Error::other("no digest for NONE")),
    }
}

fn stream<D: Digest, R: Read>(mut reader: R) -> std::io::Result<String> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
