//! High-level typed wrapper for the Executor.
//!
//! The [`Tally`] struct wraps the [`Executor`] and the
//! [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```ignore
//! use tally_executor::Tally;
//!
//! let tally = Tally::new(config, LogSink::new());
//! assert_eq!(tally.calculate("add", 2.0, 3.0)?, 5.0);
//! tally.undo()?;
//! ```

use tally_core::Calculation;
use tally_engine::{Calculator, CalculatorConfig, LogSink};

use crate::output::CalculatorInfo;
use crate::{Command, Error, Executor, Output, Result};

/// Typed calculator API.
///
/// Each method:
///
/// 1. Creates the appropriate [`Command`]
/// 2. Executes it via the [`Executor`]
/// 3. Extracts and returns the typed result
#[derive(Debug)]
pub struct Tally {
    executor: Executor,
}

impl Tally {
    /// Create a calculator with the default hooks.
    pub fn new(config: CalculatorConfig, sink: LogSink) -> Self {
        Self::from_calculator(Calculator::new(config, sink))
    }

    /// Wrap an existing calculator.
    pub fn from_calculator(calculator: Calculator) -> Self {
        Self {
            executor: Executor::new(calculator),
        }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Evaluate and record an operation.
    pub fn calculate(&self, operation: &str, a: f64, b: f64) -> Result<f64> {
        match self.executor.execute(Command::Calculate {
            operation: operation.to_string(),
            a,
            b,
        })? {
            Output::Float(v) => Ok(v),
            _ => Err(unexpected("Calculate")),
        }
    }

    /// Undo the last history mutation.
    pub fn undo(&self) -> Result<bool> {
        match self.executor.execute(Command::Undo)? {
            Output::Bool(changed) => Ok(changed),
            _ => Err(unexpected("Undo")),
        }
    }

    /// Redo the last undone mutation.
    pub fn redo(&self) -> Result<bool> {
        match self.executor.execute(Command::Redo)? {
            Output::Bool(changed) => Ok(changed),
            _ => Err(unexpected("Redo")),
        }
    }

    /// Copy of the live history, oldest first.
    pub fn history(&self) -> Result<Vec<Calculation>> {
        match self.executor.execute(Command::History)? {
            Output::Calculations(items) => Ok(items),
            _ => Err(unexpected("History")),
        }
    }

    /// Empty the history.
    pub fn clear(&self) -> Result<()> {
        match self.executor.execute(Command::Clear)? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("Clear")),
        }
    }

    /// Write history to the configured file.
    pub fn save(&self) -> Result<()> {
        match self.executor.execute(Command::Save)? {
            Output::Unit => Ok(()),
            _ => Err(unexpected("Save")),
        }
    }

    /// Replace history with the configured file's contents.
    ///
    /// Returns the number of records loaded.
    pub fn load(&self) -> Result<u64> {
        match self.executor.execute(Command::Load)? {
            Output::Uint(n) => Ok(n),
            _ => Err(unexpected("Load")),
        }
    }

    /// Registered operation names, sorted.
    pub fn operations(&self) -> Result<Vec<String>> {
        match self.executor.execute(Command::Operations)? {
            Output::Names(names) => Ok(names),
            _ => Err(unexpected("Operations")),
        }
    }

    /// Calculator state and settings.
    pub fn info(&self) -> Result<CalculatorInfo> {
        match self.executor.execute(Command::Info)? {
            Output::Info(info) => Ok(info),
            _ => Err(unexpected("Info")),
        }
    }
}

fn unexpected(command: &str) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}", command),
    }
}

// =============================================================================
// Tests
// =============================================================================
