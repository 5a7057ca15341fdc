//! Shared helpers for calculator integration tests.

use std::path::PathBuf;

use tally::prelude::*;
use tempfile::TempDir;

/// A calculator whose history file lives in a private temp directory.
pub struct Fixture {
    pub dir: TempDir,
    pub calculator: Calculator,
}

impl Fixture {
    pub fn history_file(&self) -> PathBuf {
        self.dir.path().join("history.csv")
    }
}

/// Builder pre-pointed at `dir`, auto-save off, default precision.
pub fn builder(dir: &TempDir) -> TallyBuilder {
    TallyBuilder::new()
        .auto_save(false)
        .history_file(dir.path().join("history.csv"))
}

pub fn create_calculator(max_history_size: usize) -> Fixture {
    let dir = TempDir::new().unwrap();
    let calculator = builder(&dir)
        .max_history_size(max_history_size)
        .build_calculator()
        .unwrap();
    Fixture { dir, calculator }
}

pub fn create_tally() -> (TempDir, Tally) {
    let dir = TempDir::new().unwrap();
    let tally = builder(&dir).build().unwrap();
    (dir, tally)
}

/// Operation names of the live history, oldest first.
pub fn operations(calculator: &Calculator) -> Vec<String> {
    calculator
        .history()
        .items()
        .iter()
        .map(|c| c.operation().to_string())
        .collect()
}
