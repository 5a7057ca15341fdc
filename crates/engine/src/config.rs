//! Calculator configuration.
//!
//! [`CalculatorConfig`] is an already-validated value object: the engine never
//! reads environment variables or files to produce one. Build it with
//! [`CalculatorConfig::builder`].
//!
//! # Defaults
//!
//! | Setting | Default |
//! |---------|---------|
//! | max_history_size | 1000 |
//! | precision | 6 fractional digits |
//! | auto_save | true |
//! | history_file | `./history/history.csv` |
//! | encoding | `utf-8` |
//! | max_input_value | 1e12 |

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use tally_core::{Result, ValidationError};
use tally_durability::HistoryFile;

/// Default history bound.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 1000;
/// Default rounding precision.
pub const DEFAULT_PRECISION: u32 = 6;
/// Largest accepted precision.
pub const MAX_PRECISION: u32 = 12;
/// Default operand magnitude limit.
pub const DEFAULT_MAX_INPUT_VALUE: f64 = 1e12;
/// Default history file encoding.
pub const DEFAULT_ENCODING: &str = "utf-8";
/// Default history file location.
pub const DEFAULT_HISTORY_FILE: &str = "history/history.csv";

/// Validated calculator settings.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    max_history_size: NonZeroUsize,
    precision: Option<u32>,
    auto_save: bool,
    max_input_value: f64,
    store: HistoryFile,
}

impl CalculatorConfig {
    /// Create a builder with default settings.
    pub fn builder() -> CalculatorConfigBuilder {
        CalculatorConfigBuilder::new()
    }

    /// Maximum number of live history records.
    pub fn max_history_size(&self) -> NonZeroUsize {
        self.max_history_size
    }

    /// Fractional digits results are rounded to, or `None` for no rounding.
    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    /// Whether every successful calculation saves the history.
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Largest accepted operand magnitude.
    pub fn max_input_value(&self) -> f64 {
        self.max_input_value
    }

    /// History file location.
    pub fn history_file(&self) -> &Path {
        self.store.path()
    }

    /// Canonical name of the history file encoding.
    pub fn encoding(&self) -> &'static str {
        self.store.encoding_name()
    }

    /// The history file.
    pub fn store(&self) -> &HistoryFile {
        &self.store
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_history_size: NonZeroUsize::new(DEFAULT_MAX_HISTORY_SIZE)
                .unwrap_or(NonZeroUsize::MIN),
            precision: Some(DEFAULT_PRECISION),
            auto_save: true,
            max_input_value: DEFAULT_MAX_INPUT_VALUE,
            store: HistoryFile::utf8(DEFAULT_HISTORY_FILE),
        }
    }
}

/// Builder for [`CalculatorConfig`].
///
/// # Example
///
/// ```ignore
/// let config = CalculatorConfig::builder()
///     .max_history_size(50)
///     .precision(Some(4))
///     .auto_save(false)
///     .history_file("/tmp/history.csv")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct CalculatorConfigBuilder {
    max_history_size: usize,
    precision: Option<u32>,
    auto_save: bool,
    max_input_value: f64,
    history_file: PathBuf,
    encoding: String,
}

impl CalculatorConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            precision: Some(DEFAULT_PRECISION),
            auto_save: true,
            max_input_value: DEFAULT_MAX_INPUT_VALUE,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    /// Set the history bound. Must be positive.
    pub fn max_history_size(mut self, size: usize) -> Self {
        self.max_history_size = size;
        self
    }

    /// Set rounding precision (0–12), or `None` to keep full results.
    pub fn precision(mut self, digits: Option<u32>) -> Self {
        self.precision = digits;
        self
    }

    /// Enable or disable saving after every calculation.
    pub fn auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }

    /// Set the operand magnitude limit. Must be positive and finite.
    pub fn max_input_value(mut self, limit: f64) -> Self {
        self.max_input_value = limit;
        self
    }

    /// Set the history file location.
    pub fn history_file(mut self, path: impl AsRef<Path>) -> Self {
        self.history_file = path.as_ref().to_path_buf();
        self
    }

    /// Set the history file encoding label.
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = label.into();
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// - `Validation(InvalidConfig)` for a zero history size, a precision
    ///   above 12, or a non-positive/non-finite input limit
    /// - `Validation(UnsupportedEncoding)` for an unknown encoding label
    pub fn build(self) -> Result<CalculatorConfig> {
        let max_history_size =
            NonZeroUsize::new(self.max_history_size).ok_or(ValidationError::InvalidConfig {
                key: "max_history_size",
                reason: "must be a positive integer".into(),
            })?;

        if let Some(digits) = self.precision {
            if digits > MAX_PRECISION {
                return Err(ValidationError::InvalidConfig {
                    key: "precision",
                    reason: format!("{} is outside 0..={}", digits, MAX_PRECISION),
                }
                .into());
            }
        }

        if !(self.max_input_value.is_finite() && self.max_input_value > 0.0) {
            return Err(ValidationError::InvalidConfig {
                key: "max_input_value",
                reason: format!("{} is not a positive finite number", self.max_input_value),
            }
            .into());
        }

        let store = HistoryFile::new(self.history_file, &self.encoding)?;

        Ok(CalculatorConfig {
            max_history_size,
            precision: self.precision,
            auto_save: self.auto_save,
            max_input_value: self.max_input_value,
            store,
        })
    }
}

impl Default for CalculatorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
