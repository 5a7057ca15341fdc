//! One-stop construction of a ready-to-use [`Tally`].

use std::path::Path;

use tally_core::{BinaryOp, Result};
use tally_engine::{Calculator, CalculatorConfig, CalculatorConfigBuilder, Hook, LogSink};
use tally_executor::Tally;

/// Builder for [`Tally`].
///
/// Wraps [`CalculatorConfigBuilder`] and adds the pieces that are not
/// configuration: the log sink, the hook list and extra operations.
///
/// # Example
///
/// ```ignore
/// use tally::TallyBuilder;
///
/// let tally = TallyBuilder::new()
///     .history_file("./history/history.csv")
///     .precision(Some(4))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct TallyBuilder {
    config: CalculatorConfigBuilder,
    sink: LogSink,
    hooks: Option<Vec<Hook>>,
    extra_hooks: Vec<Hook>,
    operations: Vec<(String, BinaryOp)>,
}

impl TallyBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history bound. Must be positive.
    pub fn max_history_size(mut self, size: usize) -> Self {
        self.config = self.config.max_history_size(size);
        self
    }

    /// Set rounding precision, or `None` to keep full results.
    pub fn precision(mut self, digits: Option<u32>) -> Self {
        self.config = self.config.precision(digits);
        self
    }

    /// Enable or disable saving after every calculation.
    pub fn auto_save(mut self, enabled: bool) -> Self {
        self.config = self.config.auto_save(enabled);
        self
    }

    /// Set the operand magnitude limit.
    pub fn max_input_value(mut self, limit: f64) -> Self {
        self.config = self.config.max_input_value(limit);
        self
    }

    /// Set the history file location.
    pub fn history_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config = self.config.history_file(path);
        self
    }

    /// Set the history file encoding label.
    pub fn encoding(mut self, label: impl Into<String>) -> Self {
        self.config = self.config.encoding(label);
        self
    }

    /// Send calculation logs to `sink` instead of the current subscriber.
    pub fn log_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the default hooks (log, then auto-save) with `hooks`.
    ///
    /// The configured log sink is ignored unless one of `hooks` is a
    /// [`Hook::Log`].
    pub fn hooks(mut self, hooks: Vec<Hook>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Add a hook after the default (or replaced) hook list.
    pub fn hook(mut self, hook: Hook) -> Self {
        self.extra_hooks.push(hook);
        self
    }

    /// Register an extra operation, replacing any builtin of the same name.
    pub fn operation(mut self, name: impl Into<String>, op: BinaryOp) -> Self {
        self.operations.push((name.into(), op));
        self
    }

    /// Build the calculator without the executor wrapper.
    pub fn build_calculator(self) -> Result<Calculator> {
        let config: CalculatorConfig = self.config.build()?;
        let hooks = self.hooks.unwrap_or_else(|| Hook::defaults(self.sink));
        let mut calculator = Calculator::with_hooks(config, hooks);
        for hook in self.extra_hooks {
            calculator.register_hook(hook);
        }
        for (name, op) in self.operations {
            calculator.registry_mut().register(name, op);
        }
        Ok(calculator)
    }

    /// Validate the settings and build a [`Tally`].
    pub fn build(self) -> Result<Tally> {
        self.build_calculator().map(Tally::from_calculator)
    }
}
