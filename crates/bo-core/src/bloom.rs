//! Bloom filter over the domain blocklist
//!
//! A fixed-size bit vector plus k Murmur3 derivations (seeds 0..k).
//! `test` may report false positives but never a false negative for a
//! key inserted into the same instance, so a miss is a definitive
//! "not blocked" and the interception layer can pass the request
//! through without consulting anything else.
//!
//! `size` and `hash_functions` are frozen at construction: changing
//! either moves every key's bit positions and would invalidate the
//! already-set bits.

use serde::{Deserialize, Serialize};

use crate::hash::murmur3_32;

/// Default filter width in bits (64 KiB of backing bytes).
pub const DEFAULT_SIZE: u32 = 512 * 1024;

/// Default number of hash derivations per key.
pub const DEFAULT_HASH_FUNCTIONS: u32 = 6;

/// Error type for filter construction and snapshot restore.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid filter configuration: size={size}, hash_functions={hash_functions} (both must be nonzero)")]
    InvalidConfiguration { size: u32, hash_functions: u32 },
    #[error("malformed snapshot: bit array is {actual} bytes, expected {expected} for {size} bits")]
    MalformedSnapshot {
        size: u32,
        expected: usize,
        actual: usize,
    },
}

/// Fixed-length bit vector, packed 8 bits per byte.
///
/// Invariant: `bytes.len() == ceil(size / 8)` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BitVector {
    size: u32,
    bytes: Vec<u8>,
}

impl BitVector {
    fn zeroed(size: u32) -> Self {
        Self {
            size,
            bytes: vec![0u8; Self::byte_len(size)],
        }
    }

    #[inline]
    const fn byte_len(size: u32) -> usize {
        (size as usize + 7) / 8
    }

    fn from_bytes(size: u32, bytes: Vec<u8>) -> Result<Self, FilterError> {
        let expected = Self::byte_len(size);
        if bytes.len() != expected {
            return Err(FilterError::MalformedSnapshot {
                size,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { size, bytes })
    }

    #[inline]
    fn set(&mut self, pos: u32) {
        debug_assert!(pos < self.size);
        self.bytes[(pos >> 3) as usize] |= 1 << (pos & 7);
    }

    #[inline]
    fn get(&self, pos: u32) -> bool {
        debug_assert!(pos < self.size);
        self.bytes[(pos >> 3) as usize] & (1 << (pos & 7)) != 0
    }

    fn count_ones(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }
}

/// Structural snapshot of a filter, sufficient for exact reconstruction.
///
/// Field names match the JSON the host already stores
/// (`{ size, hashFunctions, bitArray }`), so existing persisted state
/// deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSnapshot {
    pub size: u32,
    pub hash_functions: u32,
    pub bit_array: Vec<u8>,
}

/// Probabilistic membership filter over the domain blocklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    bits: BitVector,
    hash_functions: u32,
}

impl BloomFilter {
    /// Create a zeroed filter of `size` bits with `hash_functions`
    /// derivations per key.
    pub fn new(size: u32, hash_functions: u32) -> Result<Self, FilterError> {
        if size == 0 || hash_functions == 0 {
            return Err(FilterError::InvalidConfiguration {
                size,
                hash_functions,
            });
        }
        Ok(Self {
            bits: BitVector::zeroed(size),
            hash_functions,
        })
    }

    /// Create a filter with the host defaults (64 KiB, k = 6).
    pub fn with_defaults() -> Self {
        Self {
            bits: BitVector::zeroed(DEFAULT_SIZE),
            hash_functions: DEFAULT_HASH_FUNCTIONS,
        }
    }

    /// Filter width in bits.
    #[inline]
    pub fn size(&self) -> u32 {
        self.bits.size
    }

    /// Number of hash derivations per key.
    #[inline]
    pub fn hash_functions(&self) -> u32 {
        self.hash_functions
    }

    /// Number of set bits. Exposed for load-factor reporting.
    pub fn set_bits(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Raw backing bytes, `ceil(size / 8)` of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits.bytes
    }

    #[inline]
    fn positions<'a>(&'a self, key: &'a [u8]) -> impl Iterator<Item = u32> + 'a {
        let size = self.bits.size;
        (0..self.hash_functions).map(move |seed| murmur3_32(key, seed) % size)
    }

    /// Insert a key. Idempotent; bit-setting is order-independent and
    /// cannot fail.
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K) {
        let key = key.as_ref();
        for seed in 0..self.hash_functions {
            let pos = murmur3_32(key, seed) % self.bits.size;
            self.bits.set(pos);
        }
    }

    /// Insert every key in the sequence.
    pub fn insert_all<I>(&mut self, keys: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for key in keys {
            self.insert(key);
        }
    }

    /// Test a key. `false` is definitive; `true` means "possibly
    /// inserted" with false-positive probability given by
    /// [`estimated_fp_rate`](Self::estimated_fp_rate).
    pub fn test<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.positions(key.as_ref()).all(|pos| self.bits.get(pos))
    }

    /// Theoretical false-positive rate after `inserted` distinct keys:
    /// `(1 - e^(-k*n/m))^k`.
    pub fn estimated_fp_rate(&self, inserted: u64) -> f64 {
        let k = self.hash_functions as f64;
        let m = self.bits.size as f64;
        let n = inserted as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Produce a structural snapshot sufficient for exact
    /// reconstruction via [`from_snapshot`](Self::from_snapshot).
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            size: self.bits.size,
            hash_functions: self.hash_functions,
            bit_array: self.bits.bytes.clone(),
        }
    }

    /// Reconstruct a filter from a snapshot. The restored filter
    /// answers `test` identically to the one that produced it.
    pub fn from_snapshot(snapshot: FilterSnapshot) -> Result<Self, FilterError> {
        if snapshot.size == 0 || snapshot.hash_functions == 0 {
            return Err(FilterError::InvalidConfiguration {
                size: snapshot.size,
                hash_functions: snapshot.hash_functions,
            });
        }
        Ok(Self {
            bits: BitVector::from_bytes(snapshot.size, snapshot.bit_array)?,
            hash_functions: snapshot.hash_functions,
        })
    }
}
