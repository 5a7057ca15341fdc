//! Engine layer for tally
//!
//! Composes the pieces into a working calculator:
//! - [`Calculator`]: factory + history + persistence + hooks
//! - [`CalculatorConfig`]: validated settings
//! - [`Hook`] / [`Event`]: synchronous notification after each calculation
//! - [`LogSink`] / [`init_file_logging`]: logging

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculator;
pub mod config;
pub mod hooks;
pub mod logging;

pub use calculator::{round_to, Calculator};
pub use config::{
    CalculatorConfig, CalculatorConfigBuilder, DEFAULT_ENCODING, DEFAULT_HISTORY_FILE,
    DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MAX_INPUT_VALUE, DEFAULT_PRECISION, MAX_PRECISION,
};
pub use hooks::{Event, Hook};
pub use logging::{init_file_logging, LogSink, RotatingFile, LOG_BACKUPS, LOG_MAX_BYTES};
