//! # Swimbots IO
//!
//! I/O and persistence layer for the swimbots simulation.
//!
//! This crate provides:
//! - The line-oriented snapshot text format
//! - Conformance fixture discovery
//! - Compressed run histories and rkyv snapshots
//! - JSON and HexDNA genome exchange

/// Line-oriented text encoding of segment trees, swimbots and ponds
pub mod codec;
/// Error types and result aliases for I/O operations
pub mod error;
/// Paired input/output fixture directories
pub mod fixtures;
/// Gzip-compressed JSON run histories
pub mod history;
/// rkyv archives of single snapshots
pub mod persistence;
/// Validated serialization helpers for JSON and HexDNA formats
pub mod serialization;

pub use codec::{decode_pond, decode_segment_tree, encode_pond, encode_segment_tree};
pub use error::{IoError, Result};
pub use history::{load_history, save_history, HistoryFile};
pub use serialization::{from_hex_dna, from_json, to_hex_dna, to_json};
