//! Operation registry and the built-in arithmetic primitives.
//!
//! Each primitive is a plain `fn(f64, f64) -> Result<f64, DomainError>`.
//! Primitives validate their own domain and never panic; the factory turns
//! any [`DomainError`] into the uniform [`Error::Operation`].
//!
//! ## Negative operands
//!
//! | Primitive | Convention |
//! |-----------|------------|
//! | `modulus` | floored: the result takes the sign of the divisor (`-7 mod 3 = 2`) |
//! | `int_divide` | both operands truncated toward zero, then the quotient is floored (`-7 // 2 = -4`) |
//! | `root` | a negative radicand fails when `trunc(b)` is even; otherwise the result is `-(|a|^(1/b))` (`root(-8, 1.5) = -4`) |

use std::collections::BTreeMap;

use thiserror::Error;

use crate::error::{Error, Result};

/// Why a primitive has no real result for its operands.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// `divide` with a zero divisor
    #[error("division by zero is not allowed")]
    DivisionByZero,

    /// `root` with a zero degree
    #[error("0th root is undefined")]
    ZeroRoot,

    /// `root` of a negative number whose degree truncates to an even integer
    #[error("even root of negative number is not real")]
    EvenRootOfNegative,

    /// `modulus` with a zero divisor
    #[error("modulus by zero is not allowed")]
    ModulusByZero,

    /// `int_divide` whose truncated divisor is zero
    #[error("integer division by zero is not allowed")]
    IntegerDivisionByZero,

    /// `percent` with a zero denominator
    #[error("percentage with denominator zero is not allowed")]
    PercentOfZero,

    /// `power` has no real value for these operands
    #[error("{base} raised to {exponent} is undefined")]
    PowerUndefined {
        /// Base
        base: f64,
        /// Exponent
        exponent: f64,
    },

    /// Result magnitude exceeds the float range
    #[error("result out of range")]
    Overflow,
}

/// Signature shared by every registered operation.
pub type BinaryOp = fn(f64, f64) -> std::result::Result<f64, DomainError>;

/// Built-in operations, in registration order.
pub const BUILTINS: &[(&str, BinaryOp)] = &[
    ("add", add),
    ("subtract", subtract),
    ("multiply", multiply),
    ("divide", divide),
    ("power", power),
    ("root", root),
    ("modulus", modulus),
    ("int_divide", int_divide),
    ("percent", percent),
    ("abs_diff", abs_diff),
];

fn add(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    if b == 0.0 {
        return Err(DomainError::DivisionByZero);
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    // powf returns inf here instead of failing
    if a == 0.0 && b < 0.0 {
        return Err(DomainError::PowerUndefined {
            base: a,
            exponent: b,
        });
    }
    let value = a.powf(b);
    if value.is_nan() {
        return Err(DomainError::PowerUndefined {
            base: a,
            exponent: b,
        });
    }
    if value.is_infinite() {
        return Err(DomainError::Overflow);
    }
    Ok(value)
}

fn root(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    if b == 0.0 {
        return Err(DomainError::ZeroRoot);
    }
    if a < 0.0 {
        // parity of the integer part decides, so 1.5 counts as odd
        if b.trunc() % 2.0 == 0.0 {
            return Err(DomainError::EvenRootOfNegative);
        }
        return Ok(-a.abs().powf(1.0 / b));
    }
    Ok(a.powf(1.0 / b))
}

fn modulus(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    if b == 0.0 {
        return Err(DomainError::ModulusByZero);
    }
    let rem = a % b;
    if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
        Ok(rem + b)
    } else {
        Ok(rem)
    }
}

fn int_divide(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    let divisor = b.trunc();
    if divisor == 0.0 {
        return Err(DomainError::IntegerDivisionByZero);
    }
    Ok((a.trunc() / divisor).floor())
}

fn percent(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    if b == 0.0 {
        return Err(DomainError::PercentOfZero);
    }
    Ok((a / b) * 100.0)
}

fn abs_diff(a: f64, b: f64) -> std::result::Result<f64, DomainError> {
    Ok((a - b).abs())
}

/// Name → function mapping.
///
/// `OperationRegistry::default()` holds the ten built-ins. Extra operations
/// can be registered; registering an existing name replaces it.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    ops: BTreeMap<String, BinaryOp>,
}

impl OperationRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            ops: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in operations.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, op) in BUILTINS {
            registry.register(*name, *op);
        }
        registry
    }

    /// Add or replace an operation.
    pub fn register(&mut self, name: impl Into<String>, op: BinaryOp) {
        self.ops.insert(name.into(), op);
    }

    /// Look up an operation by name.
    pub fn get(&self, name: &str) -> Result<BinaryOp> {
        self.ops
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownOperation {
                name: name.to_string(),
            })
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
