//! Command dispatch.
//!
//! The executor owns one [`Calculator`] behind a mutex. Each command runs
//! entirely under that lock, so a calculation's factory → round → append →
//! notify sequence (including auto-save) is never interleaved with another
//! writer, and auto-save always persists a consistent state.

use parking_lot::Mutex;
use tally_engine::Calculator;
use tracing::debug;

use crate::output::CalculatorInfo;
use crate::{Command, Output, Result};

/// Executes [`Command`]s against a calculator.
#[derive(Debug)]
pub struct Executor {
    calculator: Mutex<Calculator>,
}

impl Executor {
    /// Wrap a calculator.
    pub fn new(calculator: Calculator) -> Self {
        Self {
            calculator: Mutex::new(calculator),
        }
    }

    /// Execute one command.
    pub fn execute(&self, command: Command) -> Result<Output> {
        debug!(
            command = command.name(),
            mutating = command.is_mutating(),
            "execute"
        );
        let mut calc = self.calculator.lock();
        match command {
            Command::Calculate { operation, a, b } => {
                calc.perform(&operation, a, b).map(Output::Float)
            }
            Command::Undo => Ok(Output::Bool(calc.undo())),
            Command::Redo => Ok(Output::Bool(calc.redo())),
            Command::History => Ok(Output::Calculations(calc.history().to_vec())),
            Command::Clear => {
                calc.clear_history();
                Ok(Output::Unit)
            }
            Command::Save => calc.save_history().map(|()| Output::Unit),
            Command::Load => calc.load_history().map(|n| Output::Uint(n as u64)),
            Command::Operations => Ok(Output::Names(
                calc.registry().names().map(str::to_string).collect(),
            )),
            Command::Info => Ok(Output::Info(info(&calc))),
        }
    }

    /// Run `f` with shared access to the calculator, under the lock.
    pub fn with_calculator<R>(&self, f: impl FnOnce(&Calculator) -> R) -> R {
        f(&self.calculator.lock())
    }

    /// Run `f` with exclusive access to the calculator, under the lock.
    pub fn with_calculator_mut<R>(&self, f: impl FnOnce(&mut Calculator) -> R) -> R {
        f(&mut self.calculator.lock())
    }
}

fn info(calc: &Calculator) -> CalculatorInfo {
    let history = calc.history();
    let config = calc.config();
    CalculatorInfo {
        history_len: history.len(),
        max_history_size: history.max_size().get(),
        undo_depth: history.undo_depth(),
        redo_depth: history.redo_depth(),
        precision: config.precision(),
        auto_save: config.auto_save(),
        history_file: config.history_file().display().to_string(),
        encoding: config.encoding().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tally_engine::{CalculatorConfig, LogSink};
    use tempfile::TempDir;

    fn create_executor(dir: &TempDir) -> Executor {
        let config = CalculatorConfig::builder()
            .auto_save(false)
            .history_file(dir.path().join("history.csv"))
            .build()
            .unwrap();
        Executor::new(Calculator::new(config, LogSink::new()))
    }

    fn calculate(op: &str, a: f64, b: f64) -> Command {
        Command::Calculate {
            operation: op.to_string(),
            a,
            b,
        }
    }

    #[test]
    fn test_calculate_returns_float() {
        let dir = TempDir::new().unwrap();
        let executor = create_executor(&dir);
        let output = executor.execute(calculate("add", 2.0, 3.0)).unwrap();
        assert_eq!(output, Output::Float(5.0));
    }

    #[test]
    fn test_undo_redo_return_bool() {
        let dir = TempDir::new().unwrap();
        let executor = create_executor(&dir);
        assert_eq!(executor.execute(Command::Undo).unwrap(), Output::Bool(false));
        executor.execute(calculate("add", 2.0, 3.0)).unwrap();
        assert_eq!(executor.execute(Command::Undo).unwrap(), Output::Bool(true));
        assert_eq!(executor.execute(Command::Redo).unwrap(), Output::Bool(true));
        assert_eq!(executor.execute(Command::Redo).unwrap(), Output::Bool(false));
    }

    #[test]
    fn test_operations_lists_builtins() {
        let dir = TempDir::new().unwrap();
        let executor = create_executor(&dir);
        match executor.execute(Command::Operations).unwrap() {
            Output::Names(names) => {
                assert_eq!(names.len(), 10);
                assert!(names.contains(&"abs_diff".to_string()));
            }
            other => panic!("Expected Names output, got {:?}", other),
        }
    }

    #[test]
    fn test_info_reflects_state() {
        let dir = TempDir::new().unwrap();
        let executor = create_executor(&dir);
        executor.execute(calculate("add", 1.0, 1.0)).unwrap();
        match executor.execute(Command::Info).unwrap() {
            Output::Info(info) => {
                assert_eq!(info.history_len, 1);
                assert_eq!(info.undo_depth, 1);
                assert_eq!(info.redo_depth, 0);
                assert!(!info.auto_save);
            }
            other => panic!("Expected Info output, got {:?}", other),
        }
    }

    #[test]
    fn test_concurrent_calculations_are_serialized() {
        let dir = TempDir::new().unwrap();
        let executor = Arc::new(create_executor(&dir));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let executor = Arc::clone(&executor);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        executor
                            .execute(calculate("add", f64::from(t), f64::from(i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        executor.with_calculator(|calc| {
            assert_eq!(calc.history().len(), 100);
            assert_eq!(calc.history().undo_depth(), 100);
        });
    }

    #[test]
    fn test_with_calculator_mut_extends_registry() {
        fn hypot(a: f64, b: f64) -> std::result::Result<f64, tally_core::DomainError> {
            Ok(a.hypot(b))
        }
        let dir = TempDir::new().unwrap();
        let executor = create_executor(&dir);
        executor.with_calculator_mut(|calc| calc.registry_mut().register("hypot", hypot));
        assert_eq!(
            executor.execute(calculate("hypot", 3.0, 4.0)).unwrap(),
            Output::Float(5.0)
        );
    }
}
