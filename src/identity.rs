//! Diagram identity: a 64-bit key derived from a document's source path and
//! its content.
//!
//! The upper 32 bits hash the path, the lower 32 bits hash the content, each
//! with Bob Jenkins' one-at-a-time hash over the UTF-8 bytes. Backends that
//! key state by the same identity depend on this being reproduced exactly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Jenkins one-at-a-time hash.
pub fn one_at_a_time(bytes: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &b in bytes {
        h = h.wrapping_add(b as u32);
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h = h.wrapping_add(h << 15);
    h
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiagramId(pub u64);

impl DiagramId {
    pub fn new(source_path: &str, content: &str) -> Self {
        Self::from_parts(
            one_at_a_time(source_path.as_bytes()),
            one_at_a_time(content.as_bytes()),
        )
    }

    pub fn from_parts(path_hash: u32, content_hash: u32) -> Self {
        DiagramId(((path_hash as u64) << 32) | content_hash as u64)
    }

    pub fn path_hash(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn content_hash(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
