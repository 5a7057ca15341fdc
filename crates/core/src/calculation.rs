//! The calculation record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One evaluated operation.
///
/// Immutable once built: fields are read through accessors. The only way to
/// change a result is [`Calculation::with_result`], which consumes the record
/// and returns a new one (used for precision rounding before the record is
/// appended to history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    operation: String,
    a: f64,
    b: f64,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl Calculation {
    /// Build a record from its parts.
    pub fn new(
        operation: impl Into<String>,
        a: f64,
        b: f64,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation: operation.into(),
            a,
            b,
            result,
            timestamp,
        }
    }

    /// Operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// First operand.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Second operand.
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Computed result.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Replace the result, keeping everything else.
    pub fn with_result(self, result: f64) -> Self {
        Self { result, ..self }
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} = {}", self.operation, self.a, self.b, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_result_keeps_other_fields() {
        let ts = Utc::now();
        let calc = Calculation::new("divide", 1.0, 3.0, 1.0 / 3.0, ts);
        let rounded = calc.clone().with_result(0.3333);

        assert_eq!(rounded.operation(), "divide");
        assert_eq!(rounded.a(), 1.0);
        assert_eq!(rounded.b(), 3.0);
        assert_eq!(rounded.result(), 0.3333);
        assert_eq!(rounded.timestamp(), ts);
        assert_ne!(calc, rounded);
    }

    #[test]
    fn test_display() {
        let calc = Calculation::new("add", 1.5, 2.0, 3.5, Utc::now());
        assert_eq!(calc.to_string(), "add 1.5 2 = 3.5");
    }
}
