//! BetsOff Core Library
//!
//! This crate provides the core computation engine for the BetsOff
//! gambling-domain blocker: a space-efficient probabilistic membership
//! filter over the blocklist, the hash family it derives bit positions
//! from, and the shared rule vocabulary used by the rule compiler.
//!
//! # Architecture
//!
//! Everything here is a pure, synchronous computation over in-memory
//! byte and string sequences. The host (request interception, storage,
//! popup UI) owns all I/O; this crate only serializes to and from byte
//! buffers it is handed.
//!
//! # Modules
//!
//! - `hash`: Murmur3-32 hash family and CRC32 for snapshot integrity
//! - `bloom`: Bloom filter over the domain blocklist
//! - `snapshot`: BOF binary snapshot codec for filter persistence
//! - `types`: shared rule action / resource type definitions
//! - `classify`: heuristic ad/tracker request classifier

pub mod bloom;
pub mod classify;
pub mod hash;
pub mod snapshot;
pub mod types;

// Re-export commonly used types
pub use bloom::{BloomFilter, FilterError, FilterSnapshot};
pub use classify::{Classifier, PatternClassifier, RequestClass};
pub use hash::{crc32, murmur3_32};
pub use snapshot::SnapshotError;
pub use types::{ResourceType, RuleAction, BLOCKED_RESOURCE_TYPES};
