//! SHA-256 content identity for pack archives.
//!
//! The digest is taken over the raw archive bytes before any entry is
//! extracted, so it identifies the pack even when extraction fails later.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::PackError;

/// Buffer size for reading archives during hashing (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// 256-bit digest of a pack archive's raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hexadecimal form.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Calculate the content hash of an archive by streaming it through SHA-256.
///
/// # Errors
///
/// Returns [`PackError::Io`] if the file cannot be opened or read.
pub fn hash_archive(path: &Path) -> Result<ContentHash, PackError> {
    let mut file = File::open(path).map_err(|e| PackError::io(path, e))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| PackError::io(path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash(hasher.finalize().into()))
}
