//! # tally
//!
//! Arithmetic evaluator with a bounded, undoable, persistent calculation
//! history.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tally::prelude::*;
//!
//! let tally = TallyBuilder::new()
//!     .history_file("./history/history.csv")
//!     .build()?;
//!
//! tally.calculate("power", 2.0, 10.0)?;   // 1024
//! tally.calculate("divide", 1.0, 3.0)?;   // 0.333333 (precision 6)
//! tally.undo()?;                          // history: [power]
//! tally.redo()?;                          // history: [power, divide]
//! tally.save()?;
//! ```
//!
//! ## Layers
//!
//! - `tally-core`: calculation record, operations, factory, errors
//! - `tally-storage`: the in-memory [`History`] with snapshot undo/redo
//! - `tally-durability`: CSV persistence through [`HistoryFile`]
//! - `tally-engine`: the [`Calculator`] facade, config, hooks, logging
//! - `tally-executor`: [`Command`]/[`Output`] dispatch and the typed [`Tally`] API

#![warn(missing_docs)]

mod builder;

pub mod prelude;

pub use builder::TallyBuilder;

pub use tally_core::{
    Calculation, CalculationFactory, DomainError, Error, OperationRegistry, Result,
    ValidationError,
};
pub use tally_durability::HistoryFile;
pub use tally_engine::{init_file_logging, Calculator, CalculatorConfig, Event, Hook, LogSink};
pub use tally_executor::{CalculatorInfo, Command, Executor, Output, Tally};
pub use tally_storage::{History, Snapshot};
