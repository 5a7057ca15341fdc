//! Calculator state shared across CLI invocations.

use tally_core::Result;
use tally_engine::{Calculator, CalculatorConfig, LogSink};
use tally_executor::{Command, Executor};
use tracing::debug;

/// Build the executor and restore history from the configured file.
///
/// A missing file starts an empty history. Any other load failure is
/// returned so the caller can stop before auto-save replaces the file.
pub fn open_executor(config: CalculatorConfig) -> Result<Executor> {
    let executor = Executor::new(Calculator::new(config, LogSink::new()));
    match executor.with_calculator_mut(|calc| calc.load_history()) {
        Ok(count) => debug!(count, "history restored"),
        Err(e) if e.is_not_found() => debug!("no history file, starting empty"),
        Err(e) => return Err(e),
    }
    Ok(executor)
}

/// Whether a successful `cmd` leaves history changed but not yet on disk.
///
/// Calculations are written by the auto-save hook and `load` reads the
/// file itself, so neither needs a follow-up save.
pub fn needs_save(cmd: &Command) -> bool {
    cmd.is_mutating() && !matches!(cmd, Command::Calculate { .. } | Command::Load)
}
