//! Storage layer for tally
//!
//! This crate implements the in-memory calculation history:
//! - History: bounded, ordered sequence of calculations
//! - Snapshot: frozen copy of the sequence, shared by the undo/redo stacks
//! - Undo/redo as whole-state restores

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod history;

pub use history::{History, Snapshot};
