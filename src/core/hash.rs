//! Map Fingerprints
//!
//! Deterministic SHA-256 hashing of decoded map content, so two loads of
//! the same resource can be compared without keeping the raw bytes around.

use sha2::{Sha256, Digest};

use super::grid::Grid;

/// SHA-256 digest of a map's content.
pub type Fingerprint = [u8; 32];

/// Domain separator for map content hashes.
const MAP_DOMAIN: &[u8] = b"PRO_TERRAIN_MAP_V1";

/// Streaming hasher over map fields.
///
/// Multi-byte values are fed little-endian and strings carry a length
/// prefix, so field boundaries cannot shift between two different maps.
pub struct ContentHasher {
    sha: Sha256,
}

impl ContentHasher {
    /// Hasher seeded with `domain`.
    pub fn new(domain: &[u8]) -> Self {
        let mut sha = Sha256::new();
        sha.update(domain);
        Self { sha }
    }

    /// Hasher for decoded map content.
    pub fn for_map() -> Self {
        Self::new(MAP_DOMAIN)
    }

    /// Raw bytes, unprefixed.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.sha.update(bytes);
    }

    /// A single byte.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.sha.update([value]);
    }

    /// Little-endian u32.
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.sha.update(value.to_le_bytes());
    }

    /// Little-endian i32.
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.sha.update(value.to_le_bytes());
    }

    /// One byte, 0 or 1.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(u8::from(value));
    }

    /// Byte length, then UTF-8 bytes.
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.sha.update(value.as_bytes());
    }

    /// Every cell of an `i32` grid in row-major order.
    pub fn update_i32_grid(&mut self, grid: &Grid<i32>) {
        for cell in grid.cells() {
            self.update_i32(*cell);
        }
    }

    /// Consume the hasher.
    pub fn finalize(self) -> Fingerprint {
        self.sha.finalize().into()
    }
}

/// Lowercase hex rendering of a fingerprint, for logs and summaries.
pub fn fingerprint_hex(fingerprint: &Fingerprint) -> String {
    hex::encode(fingerprint)
}
