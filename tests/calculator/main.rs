//! Calculator integration tests.
//!
//! Exercises the public API end to end: the facade, persistence through real
//! files, and the command executor.

mod common;
mod executor;
mod facade;
mod persistence;
