//! Environment-driven settings.
//!
//! Values come from `CALCULATOR_*` variables first, then command-line flags
//! override them. Malformed numeric variables fall back to defaults rather
//! than aborting startup; malformed flags are reported as errors.

use std::env;
use std::path::PathBuf;

use clap::ArgMatches;
use tally_core::Result;
use tally_engine::{
    CalculatorConfig, DEFAULT_ENCODING, DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MAX_INPUT_VALUE,
    DEFAULT_PRECISION, MAX_PRECISION,
};

const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_LOG_FILE: &str = "calculator.log";
const DEFAULT_HISTORY_DIR: &str = "./history";
const DEFAULT_HISTORY_FILE: &str = "history.csv";

/// Resolved process settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_file: PathBuf,
    pub history_file: PathBuf,
    pub max_history_size: usize,
    pub precision: Option<u32>,
    pub auto_save: bool,
    pub max_input_value: f64,
    pub encoding: String,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let log_dir = PathBuf::from(var("CALCULATOR_LOG_DIR", DEFAULT_LOG_DIR));
        let history_dir = PathBuf::from(var("CALCULATOR_HISTORY_DIR", DEFAULT_HISTORY_DIR));

        let max_history_size = lookup("CALCULATOR_MAX_HISTORY_SIZE")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_HISTORY_SIZE);

        let precision = match lookup("CALCULATOR_PRECISION") {
            None => Some(DEFAULT_PRECISION),
            Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
            Some(v) => Some(
                v.trim()
                    .parse::<i64>()
                    .map(clamp_precision)
                    .unwrap_or(DEFAULT_PRECISION),
            ),
        };

        let max_input_value = lookup("CALCULATOR_MAX_INPUT_VALUE")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_MAX_INPUT_VALUE);

        let auto_save = lookup("CALCULATOR_AUTO_SAVE")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);

        Self {
            log_file: log_dir.join(var("CALCULATOR_LOG_FILE", DEFAULT_LOG_FILE)),
            history_file: history_dir.join(var("CALCULATOR_HISTORY_FILE", DEFAULT_HISTORY_FILE)),
            max_history_size,
            precision,
            auto_save,
            max_input_value,
            encoding: var("CALCULATOR_DEFAULT_ENCODING", DEFAULT_ENCODING),
        }
    }

    /// Apply command-line overrides.
    pub fn apply_matches(&mut self, matches: &ArgMatches) -> std::result::Result<(), String> {
        if let Some(path) = matches.get_one::<String>("history-file") {
            self.history_file = PathBuf::from(path);
        }
        if let Some(label) = matches.get_one::<String>("encoding") {
            self.encoding = label.clone();
        }
        if let Some(raw) = matches.get_one::<String>("precision") {
            self.precision = if raw.eq_ignore_ascii_case("none") {
                None
            } else {
                let digits = raw
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid precision '{}': {}", raw, e))?;
                Some(digits)
            };
        }
        if let Some(raw) = matches.get_one::<String>("max-history") {
            self.max_history_size = raw
                .parse::<usize>()
                .map_err(|e| format!("Invalid max-history '{}': {}", raw, e))?;
        }
        if matches.get_flag("no-autosave") {
            self.auto_save = false;
        }
        Ok(())
    }

    /// Build the calculator configuration.
    pub fn calculator_config(&self) -> Result<CalculatorConfig> {
        CalculatorConfig::builder()
            .max_history_size(self.max_history_size)
            .precision(self.precision)
            .auto_save(self.auto_save)
            .max_input_value(self.max_input_value)
            .history_file(&self.history_file)
            .encoding(self.encoding.as_str())
            .build()
    }
}

fn clamp_precision(digits: i64) -> u32 {
    digits.clamp(0, i64::from(MAX_PRECISION)) as u32
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}
