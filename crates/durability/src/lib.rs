//! Durability layer for tally
//!
//! This crate persists calculation history as a table:
//! - codec: History ⇄ rows (`operation, a, b, result, timestamp`)
//! - csv: rows ⇄ CSV text
//! - file: CSV text ⇄ bytes on disk in the configured encoding
//!
//! Writes are plain file replacements: a crash mid-write can leave a
//! truncated file behind.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod file;

pub use codec::{decode_csv, deserialize, encode_csv, serialize, HistoryRow, COLUMNS};
pub use file::HistoryFile;
