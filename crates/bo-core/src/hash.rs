//! Hash functions for BetsOff
//!
//! The membership filter derives its k bit positions from Murmur3 32-bit
//! with sequential seeds 0..k. The algorithm and constants must stay
//! bit-for-bit stable: the host keeps serialized filter snapshots across
//! releases, and a hash change would silently invalidate every bit
//! position in them.
//!
//! All arithmetic is wrapping 32-bit; never widen to u64/usize here.

/// Murmur3 32-bit hash.
/// Optimized for short keys (typical hostname lengths).
#[inline]
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    let len = data.len();
    let mut h = seed;
    let mut i = 0;

    // Process 4-byte chunks, little-endian
    let chunks = (len >> 2) << 2; // Round down to multiple of 4
    while i < chunks {
        let k = u32::from_le_bytes([
            data[i],
            data[i + 1],
            data[i + 2],
            data[i + 3],
        ]);

        let k = k.wrapping_mul(0xcc9e2d51);
        let k = k.rotate_left(15);
        let k = k.wrapping_mul(0x1b873593);

        h ^= k;
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe6546b64);

        i += 4;
    }

    // Fold the 1-3 byte tail through one reduced mixing round
    let mut k: u32 = 0;
    let remainder = len & 3;
    if remainder >= 3 {
        k ^= (data[i + 2] as u32) << 16;
    }
    if remainder >= 2 {
        k ^= (data[i + 1] as u32) << 8;
    }
    if remainder >= 1 {
        k ^= data[i] as u32;
        let k = k.wrapping_mul(0xcc9e2d51);
        let k = k.rotate_left(15);
        let k = k.wrapping_mul(0x1b873593);
        h ^= k;
    }

    // Finalization: length XOR plus the standard avalanche
    h ^= len as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;

    h
}

/// Compute CRC32 for snapshot integrity checking.
/// Uses the standard CRC32 polynomial (IEEE 802.3).
pub fn crc32(data: &[u8]) -> u32 {
    static CRC32_TABLE: [u32; 256] = {
        let mut table = [0u32; 256];
        let mut i = 0;
        while i < 256 {
            let mut c = i as u32;
            let mut j = 0;
            while j < 8 {
                c = if c & 1 != 0 {
                    0xedb88320 ^ (c >> 1)
                } else {
                    c >> 1
                };
                j += 1;
            }
            table[i] = c;
            i += 1;
        }
        table
    };

    let mut crc = 0xffffffff_u32;
    for &byte in data {
        crc = CRC32_TABLE[((crc ^ byte as u32) & 0xff) as usize] ^ (crc >> 8);
    }
    crc ^ 0xffffffff
}

#[cfg(test)]
mod tests {
    use super::*;

    // Golden vectors recorded from a reference run. These pin the exact
    // algorithm; a failure here means stored snapshots are no longer
    // readable.
    #[test]
    fn test_murmur3_golden_vectors() {
        assert_eq!(murmur3_32(b"", 0), 0x00000000);
        assert_eq!(murmur3_32(b"a", 0), 0x3c2569b2);
        assert_eq!(murmur3_32(b"abc", 0), 0xb3dd93fa);
        assert_eq!(murmur3_32(b"abcd", 0), 0x43ed676a);
        assert_eq!(murmur3_32(b"bet365.com", 0), 0xa4278aa6);
        assert_eq!(murmur3_32(b"bet365.com", 3), 0xe07cc1c6);
        assert_eq!(murmur3_32(b"betway.com", 0), 0x81908bdb);
        assert_eq!(murmur3_32(b"example.com", 0), 0x6971e733);
    }

    // Published reference vectors for the upstream algorithm.
    #[test]
    fn test_murmur3_reference_vectors() {
        assert_eq!(murmur3_32(b"Hello, world!", 1234), 0xfaf6cdb3);
        assert_eq!(murmur3_32(b"aaaa", 0x9747b28c), 0x5a97808a);
    }

    #[test]
    fn test_murmur3_consistent() {
        let h1 = murmur3_32(b"bet365.com", 0);
        let h2 = murmur3_32(b"bet365.com", 0);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_murmur3_different_strings() {
        let h1 = murmur3_32(b"bet365.com", 0);
        let h2 = murmur3_32(b"betway.com", 0);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_murmur3_different_seeds() {
        let h1 = murmur3_32(b"bet365.com", 0);
        let h2 = murmur3_32(b"bet365.com", 1);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_murmur3_empty_key_uses_seed() {
        // Empty input is valid; the result depends only on the seed.
        assert_ne!(murmur3_32(b"", 1), murmur3_32(b"", 2));
    }

    #[test]
    fn test_murmur3_all_tail_lengths() {
        // Exercise 0-3 byte tails across several block counts.
        for len in 0..=20 {
            let s = vec![b'a'; len];
            let h1 = murmur3_32(&s, 7);
            let h2 = murmur3_32(&s, 7);
            assert_eq!(h1, h2);
        }
    }

    #[test]
    fn test_murmur3_non_ascii_bytes() {
        // Multi-byte keys hash by their UTF-8 bytes; insert and test
        // must agree on this, so pin it.
        let h1 = murmur3_32("bücher.example".as_bytes(), 0);
        let h2 = murmur3_32("bücher.example".as_bytes(), 0);
        assert_eq!(h1, h2);
        assert_ne!(h1, murmur3_32(b"bucher.example", 0));
    }

    #[test]
    fn test_crc32_consistent() {
        let data = [1u8, 2, 3, 4, 5];
        assert_eq!(crc32(&data), crc32(&data));
    }

    #[test]
    fn test_crc32_known_value() {
        // "123456789" is the canonical CRC32 check input.
        assert_eq!(crc32(b"123456789"), 0xcbf43926);
    }

    #[test]
    fn test_crc32_detects_changes() {
        let data1 = [1u8, 2, 3];
        let data2 = [1u8, 2, 4];
        assert_ne!(crc32(&data1), crc32(&data2));
    }
}
