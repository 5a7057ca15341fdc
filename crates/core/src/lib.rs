//! Core types for tally
//!
//! This crate defines the pieces every other crate builds on:
//! - [`Calculation`]: the immutable record of one evaluated operation
//! - [`OperationRegistry`]: operation names mapped to arithmetic primitives
//! - [`CalculationFactory`]: evaluates an operation and stamps a record
//! - [`Error`] / [`ValidationError`] / [`DomainError`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calculation;
pub mod error;
pub mod factory;
pub mod operation;

pub use calculation::Calculation;
pub use error::{Error, Result, ValidationError};
pub use factory::CalculationFactory;
pub use operation::{BinaryOp, DomainError, OperationRegistry, BUILTINS};
