//! Convenient imports for tally.
//!
//! ```ignore
//! use tally::prelude::*;
//!
//! let tally = TallyBuilder::new().auto_save(false).build()?;
//! tally.calculate("add", 2.0, 3.0)?;
//! ```

// Main entry points
pub use crate::builder::TallyBuilder;
pub use tally_executor::{Command, Executor, Output, Tally};

// Error handling
pub use tally_core::{Error, Result, ValidationError};

// Core types
pub use tally_core::{Calculation, OperationRegistry};
pub use tally_engine::{Calculator, CalculatorConfig, Hook, LogSink};
pub use tally_storage::History;
