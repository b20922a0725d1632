//! Deterministic hashing for content-addressed set identity.
//!
//! Frozen hybrid sets expose a content hash that must be stable across
//! processes and runs, so the default randomized hasher cannot be used.
//! `ContentHasher` is a fixed-seed FNV-1a variant with a final avalanche
//! step for better distribution in small tables.

use std::hash::{BuildHasher, Hash, Hasher};

/// Deterministic, non-cryptographic hasher.
///
/// Uses the FNV-1a offset basis and prime, with every integer write routed
/// through `write_u64` so results do not depend on platform byte order.
#[derive(Debug, Clone)]
pub struct ContentHasher {
    state: u64,
}

impl ContentHasher {
    /// FNV-1a 64-bit offset basis.
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    /// FNV-1a 64-bit prime.
    const PRIME: u64 = 0x0000_0100_0000_01b3;
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for ContentHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.state ^= u64::from(i);
        self.state = self.state.wrapping_mul(Self::PRIME);
    }

    fn write_u16(&mut self, i: u16) {
        self.write_u64(u64::from(i));
    }

    fn write_u32(&mut self, i: u32) {
        self.write_u64(u64::from(i));
    }

    fn write_u64(&mut self, i: u64) {
        self.state ^= i;
        self.state = self.state.wrapping_mul(Self::PRIME);
    }

    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    fn finish(&self) -> u64 {
        // Splitmix64 finalizer.
        let mut h = self.state;
        h ^= h >> 30;
        h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
        h ^= h >> 27;
        h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
        h ^= h >> 31;
        h
    }
}

/// Builder for deterministic hashers.
#[derive(Debug, Clone, Default)]
pub struct ContentBuildHasher;

impl BuildHasher for ContentBuildHasher {
    type Hasher = ContentHasher;

    fn build_hasher(&self) -> Self::Hasher {
        ContentHasher::default()
    }
}

/// Hashes a single value with a fresh deterministic hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = ContentHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}
