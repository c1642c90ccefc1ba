//! Content hashing using blake3.
//!
//! The digest of an asset's bytes is the only change signal the pipeline
//! trusts; modification times are never consulted.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{AssetError, AssetResult};

/// Read chunk size for streaming hashes.
const CHUNK_SIZE: usize = 64 * 1024;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash an in-memory byte slice.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// Lowercase hex encoding (64 chars), as stored in metadata files.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-char hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 16 hex chars are enough for log lines
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Compute the blake3 hash of a file, streaming it in fixed-size chunks.
///
/// Fails with [`AssetError::NotFound`] when the file is missing.
pub fn compute_content_hash(path: &Path) -> AssetResult<ContentHash> {
    let file = File::open(path).map_err(|e| AssetError::io(path, e))?;

    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(AssetError::io(path, e)),
        }
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}
