//! Operand parsing.
//!
//! Operands arrive as text; they must parse as numbers and stay within the
//! configured magnitude limit before they reach the calculator.

use tally_core::ValidationError;

/// Parse one operand and check `|x| <= limit`.
///
/// Accepts anything `f64::from_str` does, including exponent forms like
/// `1e3`. Non-finite spellings (`inf`, `nan`) parse here and are rejected
/// later: infinities exceed any finite limit, NaN fails the factory's
/// finiteness check.
pub fn parse_operand(name: &'static str, raw: &str, limit: f64) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotNumeric {
            input: raw.to_string(),
        })?;
    if value.abs() > limit {
        return Err(ValidationError::OutOfRange { name, value, limit });
    }
    Ok(value)
}

/// Parse both operands of a binary operation.
pub fn parse_operands(a: &str, b: &str, limit: f64) -> Result<(f64, f64), ValidationError> {
    Ok((parse_operand("a", a, limit)?, parse_operand("b", b, limit)?))
}
