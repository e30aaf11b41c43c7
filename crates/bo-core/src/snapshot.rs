//! BOF binary snapshot codec
//!
//! Fixed on-disk framing for a serialized filter. All fields are
//! little-endian.
//!
//! Layout:
//!
//! ```text
//! offset  0  u8[4]  magic = "BOF1"
//! offset  4  u16    version
//! offset  6  u16    flags (bit 0 = CRC32 present)
//! offset  8  u32    size (filter width in bits)
//! offset 12  u32    hashFunctions
//! offset 16  u32    bitBytes (must equal ceil(size / 8))
//! offset 20  u32    crc32 of the bit array (0 if flag unset)
//! offset 24  u8[bitBytes] bit array
//! ```

use crate::bloom::{BloomFilter, FilterError, FilterSnapshot};
use crate::hash::crc32;

/// Magic bytes: "BOF1"
pub const BOF_MAGIC: [u8; 4] = [0x42, 0x4f, 0x46, 0x31];

/// Current format version
pub const BOF_VERSION: u16 = 1;

/// Header size in bytes
pub const HEADER_SIZE: usize = 24;

/// Header field byte offsets.
mod header {
    pub const MAGIC: usize = 0;
    pub const VERSION: usize = 4;
    pub const FLAGS: usize = 6;
    pub const SIZE: usize = 8;
    pub const HASH_FUNCTIONS: usize = 12;
    pub const BIT_BYTES: usize = 16;
    pub const CRC32: usize = 20;
}

/// Header flags.
mod header_flags {
    /// Snapshot includes a CRC32 of the bit array
    pub const HAS_CRC32: u16 = 1 << 0;
}

/// Error type for snapshot decoding.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("data too short")]
    DataTooShort,
    #[error("invalid magic bytes")]
    InvalidMagic,
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u16),
    #[error("CRC32 mismatch: stored={stored:#010x}, computed={computed:#010x}")]
    Crc32Mismatch { stored: u32, computed: u32 },
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Encode a filter into the BOF1 binary form.
pub fn encode(filter: &BloomFilter) -> Vec<u8> {
    let bits = filter.as_bytes();
    let mut buffer = vec![0u8; HEADER_SIZE + bits.len()];

    buffer[header::MAGIC..header::MAGIC + 4].copy_from_slice(&BOF_MAGIC);
    write_u16_le(&mut buffer, header::VERSION, BOF_VERSION);
    write_u16_le(&mut buffer, header::FLAGS, header_flags::HAS_CRC32);
    write_u32_le(&mut buffer, header::SIZE, filter.size());
    write_u32_le(&mut buffer, header::HASH_FUNCTIONS, filter.hash_functions());
    write_u32_le(&mut buffer, header::BIT_BYTES, bits.len() as u32);
    write_u32_le(&mut buffer, header::CRC32, crc32(bits));
    buffer[HEADER_SIZE..].copy_from_slice(bits);

    buffer
}

/// Decode a BOF1 buffer back into a filter.
pub fn decode(data: &[u8]) -> Result<BloomFilter, SnapshotError> {
    if data.len() < HEADER_SIZE {
        return Err(SnapshotError::DataTooShort);
    }

    if data[header::MAGIC..header::MAGIC + 4] != BOF_MAGIC {
        return Err(SnapshotError::InvalidMagic);
    }

    let version = read_u16_le(data, header::VERSION);
    if version != BOF_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }

    let flags = read_u16_le(data, header::FLAGS);
    let size = read_u32_le(data, header::SIZE);
    let hash_functions = read_u32_le(data, header::HASH_FUNCTIONS);
    let bit_bytes = read_u32_le(data, header::BIT_BYTES) as usize;

    if data.len() < HEADER_SIZE + bit_bytes {
        return Err(SnapshotError::DataTooShort);
    }
    let bits = &data[HEADER_SIZE..HEADER_SIZE + bit_bytes];

    if flags & header_flags::HAS_CRC32 != 0 {
        let stored = read_u32_le(data, header::CRC32);
        let computed = crc32(bits);
        if stored != computed {
            return Err(SnapshotError::Crc32Mismatch { stored, computed });
        }
    }

    // The length invariant (bitBytes == ceil(size/8)) and the nonzero
    // configuration are enforced by the filter itself.
    let filter = BloomFilter::from_snapshot(FilterSnapshot {
        size,
        hash_functions,
        bit_array: bits.to_vec(),
    })?;

    Ok(filter)
}

#[inline]
fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

#[inline]
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[inline]
fn write_u16_le(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn write_u32_le(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}
