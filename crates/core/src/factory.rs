//! Calculation factory.
//!
//! `create` is the only place a [`Calculation`] is produced from operands:
//! look the operation up, evaluate it, and stamp the record. Every failure
//! raised while evaluating surfaces as [`Error::Operation`], whichever
//! primitive raised it.

use chrono::Utc;

use crate::calculation::Calculation;
use crate::error::{Error, Result, ValidationError};
use crate::operation::OperationRegistry;

/// Produces calculation records from a registry.
#[derive(Debug, Clone, Default)]
pub struct CalculationFactory {
    registry: OperationRegistry,
}

impl CalculationFactory {
    /// Create a factory over the given registry.
    pub fn new(registry: OperationRegistry) -> Self {
        Self { registry }
    }

    /// The registry this factory evaluates against.
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Mutable access, for registering extra operations.
    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        &mut self.registry
    }

    /// Evaluate `operation` on `(a, b)` and wrap the result in a record.
    ///
    /// # Errors
    ///
    /// - `UnknownOperation` if `operation` is not registered
    /// - `Validation(NonFinite)` if either operand is NaN or infinite
    /// - `Operation` if evaluation fails or yields a non-finite value
    pub fn create(&self, operation: &str, a: f64, b: f64) -> Result<Calculation> {
        let op = self.registry.get(operation)?;
        check_finite("a", a)?;
        check_finite("b", b)?;

        let result = op(a, b).map_err(|e| Error::operation(operation, e.to_string()))?;
        if !result.is_finite() {
            return Err(Error::operation(operation, "result is not a finite number"));
        }

        Ok(Calculation::new(operation, a, b, result, Utc::now()))
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { name }.into())
    }
}
