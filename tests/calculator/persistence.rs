//! Saving and loading history through real files.

use crate::common::*;
use tally::prelude::*;

#[test]
fn save_load_round_trip() {
    let mut f = create_calculator(10);
    f.calculator.perform("add", 0.1, 0.2).unwrap();
    f.calculator.perform("power", 2.0, -1.0).unwrap();
    f.calculator.perform("modulus", -7.0, 3.0).unwrap();
    let saved = f.calculator.history().to_vec();
    f.calculator.save_history().unwrap();

    let mut other = builder(&f.dir).build_calculator().unwrap();
    assert_eq!(other.load_history().unwrap(), 3);
    assert_eq!(other.history().to_vec(), saved);
}

#[test]
fn load_starts_without_undo_history() {
    let mut f = create_calculator(10);
    f.calculator.perform("add", 1.0, 2.0).unwrap();
    f.calculator.save_history().unwrap();
    f.calculator.perform("add", 3.0, 4.0).unwrap();

    f.calculator.load_history().unwrap();
    assert_eq!(f.calculator.history().len(), 1);
    assert!(!f.calculator.history().can_undo());
    assert!(!f.calculator.undo());
}

#[test]
fn load_missing_file_keeps_history() {
    let mut f = create_calculator(10);
    f.calculator.perform("add", 1.0, 2.0).unwrap();

    let err = f.calculator.load_history().unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(f.calculator.history().len(), 1);
}

#[test]
fn load_truncates_to_newest_rows() {
    let mut f = create_calculator(10);
    for i in 1..=5 {
        f.calculator.perform("add", i as f64, 0.0).unwrap();
    }
    f.calculator.save_history().unwrap();

    let mut small = builder(&f.dir)
        .max_history_size(3)
        .build_calculator()
        .unwrap();
    assert_eq!(small.load_history().unwrap(), 3);
    let results: Vec<f64> = small.history().items().iter().map(|c| c.result()).collect();
    assert_eq!(results, vec![3.0, 4.0, 5.0]);
}

#[test]
fn loads_naive_timestamps_and_reordered_columns() {
    let f = create_calculator(10);
    std::fs::write(
        f.history_file(),
        "timestamp,result,b,a,operation\n2024-05-01T12:30:00.250,5,3,2,add\n2024-05-01 12:31:00,6,3,2,multiply\n",
    )
    .unwrap();

    let mut c = f.calculator;
    assert_eq!(c.load_history().unwrap(), 2);
    let items = c.history().items();
    assert_eq!(items[0].operation(), "add");
    assert_eq!(items[0].result(), 5.0);
    assert_eq!(
        items[1].timestamp().to_rfc3339(),
        "2024-05-01T12:31:00+00:00"
    );
}

#[test]
fn malformed_file_is_rejected() {
    let mut f = create_calculator(10);
    f.calculator.perform("add", 1.0, 2.0).unwrap();
    std::fs::write(
        f.history_file(),
        "operation,a,b,result,timestamp\nadd,one,2,3,2024-05-01T00:00:00Z\n",
    )
    .unwrap();

    let err = f.calculator.load_history().unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MalformedRow { row: 1, .. })
    ));
    assert_eq!(f.calculator.history().len(), 1);
}

#[test]
fn latin1_history_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("latin1.csv");
    let mut c = TallyBuilder::new()
        .auto_save(false)
        .history_file(&path)
        .encoding("latin1")
        .operation("café", |a, b| Ok(a + b))
        .build_calculator()
        .unwrap();

    c.perform("café", 1.0, 2.0).unwrap();
    c.save_history().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.contains(&0xE9));

    c.clear_history();
    assert_eq!(c.load_history().unwrap(), 1);
    assert_eq!(c.history().items()[0].operation(), "café");
}
