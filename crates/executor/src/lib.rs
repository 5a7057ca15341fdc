//! Command execution layer for tally.
//!
//! Clients describe what they want as a [`Command`]; the [`Executor`] runs
//! it against a mutex-guarded calculator and returns an [`Output`]. [`Tally`]
//! layers typed methods on top.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
mod command;
mod executor;
mod output;

pub use api::Tally;
pub use command::Command;
pub use executor::Executor;
pub use output::{CalculatorInfo, Output};

pub use tally_core::{Calculation, Error, Result, ValidationError};
