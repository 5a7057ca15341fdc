//! Results returned by the [`Executor`](crate::Executor).

use serde::Serialize;
use tally_core::Calculation;

/// Command result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// No value
    Unit,
    /// A computed result
    Float(f64),
    /// Whether something changed
    Bool(bool),
    /// A count
    Uint(u64),
    /// History records, oldest first
    Calculations(Vec<Calculation>),
    /// Operation names
    Names(Vec<String>),
    /// Calculator description
    Info(CalculatorInfo),
}

/// Snapshot of calculator state and settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorInfo {
    /// Live history records
    pub history_len: usize,
    /// History bound
    pub max_history_size: usize,
    /// States available to undo
    pub undo_depth: usize,
    /// States available to redo
    pub redo_depth: usize,
    /// Rounding precision, if any
    pub precision: Option<u32>,
    /// Whether auto-save is on
    pub auto_save: bool,
    /// History file location
    pub history_file: String,
    /// History file encoding
    pub encoding: String,
}
