//! Calculator facade.
//!
//! [`Calculator::perform`] is the single entry point for evaluating an
//! operation. Its steps run in a fixed order:
//!
//! 1. The factory builds the calculation (errors propagate; history untouched)
//! 2. The result is rounded to the configured precision
//! 3. The record is appended to history (undo snapshot, eviction)
//! 4. Hooks fire in registration order
//!
//! Auto-save failures in step 4 are logged and never undo step 3.

use tally_core::{CalculationFactory, OperationRegistry, Result};
use tally_storage::History;
use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::hooks::{Event, Hook};
use crate::logging::LogSink;

/// Values at or above this magnitude have no fractional digits to round.
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Round `value` to `digits` fractional digits, half away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    scaled.round() / factor
}

/// Factory + history + persistence behind one API.
#[derive(Debug)]
pub struct Calculator {
    factory: CalculationFactory,
    history: History,
    config: CalculatorConfig,
    hooks: Vec<Hook>,
}

impl Calculator {
    /// Create a calculator with the default hooks (logging, then auto-save).
    pub fn new(config: CalculatorConfig, sink: LogSink) -> Self {
        Self::with_hooks(config, Hook::defaults(sink))
    }

    /// Create a calculator with an explicit hook list.
    pub fn with_hooks(config: CalculatorConfig, hooks: Vec<Hook>) -> Self {
        Self {
            factory: CalculationFactory::default(),
            history: History::new(config.max_history_size()),
            config,
            hooks,
        }
    }

    /// Append a hook; it fires after the existing ones.
    pub fn register_hook(&mut self, hook: Hook) {
        self.hooks.push(hook);
    }

    /// The configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// The operation registry.
    pub fn registry(&self) -> &OperationRegistry {
        self.factory.registry()
    }

    /// Mutable registry access, for adding operations.
    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        self.factory.registry_mut()
    }

    /// The live history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Evaluate `operation` on `(a, b)`, record it, and return the
    /// (possibly rounded) result.
    ///
    /// # Errors
    ///
    /// `UnknownOperation`, `Operation` or `Validation` from the factory. On
    /// error the history is unchanged and no hook fires.
    pub fn perform(&mut self, operation: &str, a: f64, b: f64) -> Result<f64> {
        let mut calc = self.factory.create(operation, a, b)?;
        if let Some(digits) = self.config.precision() {
            let rounded = round_to(calc.result(), digits);
            calc = calc.with_result(rounded);
        }
        let result = calc.result();

        self.history.add(calc);
        if let Some(calc) = self.history.last() {
            self.notify(Event::Calculation(calc));
        }
        Ok(result)
    }

    /// Undo the last history mutation. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    /// Redo the last undone mutation. Returns `false` if there was none.
    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    /// Empty the history. Undoable.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Write the live history to the configured file.
    pub fn save_history(&self) -> Result<()> {
        self.config.store().save(self.history.items())
    }

    /// Replace the live history with the configured file's contents.
    ///
    /// The loaded history starts with empty undo/redo stacks. Returns the
    /// number of records loaded. On error the current history is kept.
    pub fn load_history(&mut self) -> Result<usize> {
        let history = self
            .config
            .store()
            .load(self.config.max_history_size())?;
        self.history = history;
        Ok(self.history.len())
    }

    fn notify(&self, event: Event<'_>) {
        for hook in &self.hooks {
            match (hook, event) {
                (Hook::Log(sink), Event::Calculation(calc)) => sink.record(calc),
                (Hook::AutoSave, Event::Calculation(_)) => {
                    if !self.config.auto_save() {
                        continue;
                    }
                    match self.save_history() {
                        Ok(()) => debug!(kind = event.kind(), "auto-save complete"),
                        Err(e) => warn!(error = %e, "auto-save failed"),
                    }
                }
            }
        }
    }
}
