//! Calculator facade: perform, undo/redo, eviction, rounding, hooks.

use crate::common::*;
use tally::prelude::*;

// ============================================================================
// Perform
// ============================================================================

#[test]
fn every_builtin_evaluates() {
    let mut f = create_calculator(100);
    let c = &mut f.calculator;

    assert_eq!(c.perform("add", 2.0, 3.0).unwrap(), 5.0);
    assert_eq!(c.perform("subtract", 2.0, 3.0).unwrap(), -1.0);
    assert_eq!(c.perform("multiply", 2.5, 4.0).unwrap(), 10.0);
    assert_eq!(c.perform("divide", 7.0, 2.0).unwrap(), 3.5);
    assert_eq!(c.perform("power", 2.0, 10.0).unwrap(), 1024.0);
    assert_eq!(c.perform("root", 27.0, 3.0).unwrap(), 3.0);
    assert_eq!(c.perform("modulus", 7.0, 3.0).unwrap(), 1.0);
    assert_eq!(c.perform("int_divide", 7.0, 2.0).unwrap(), 3.0);
    assert_eq!(c.perform("percent", 25.0, 200.0).unwrap(), 12.5);
    assert_eq!(c.perform("abs_diff", 3.0, 10.0).unwrap(), 7.0);

    assert_eq!(c.history().len(), 10);
}

#[test]
fn domain_error_leaves_history_unchanged() {
    let mut f = create_calculator(10);
    let c = &mut f.calculator;
    c.perform("add", 1.0, 1.0).unwrap();

    let before = c.history().to_vec();
    let err = c.perform("divide", 5.0, 0.0).unwrap_err();

    assert!(err.is_operation());
    assert!(err.to_string().starts_with("divide failed"));
    assert_eq!(c.history().to_vec(), before);
    assert_eq!(c.history().undo_depth(), 1);
}

#[test]
fn unknown_operation_is_reported() {
    let mut f = create_calculator(10);
    let err = f.calculator.perform("sqrt", 4.0, 0.0).unwrap_err();
    assert!(matches!(err, Error::UnknownOperation { ref name } if name == "sqrt"));
    assert!(f.calculator.history().is_empty());
}

#[test]
fn results_are_rounded_to_precision() {
    let mut f = create_calculator(10);
    assert_eq!(f.calculator.perform("divide", 1.0, 3.0).unwrap(), 0.333333);
    assert_eq!(f.calculator.history().items()[0].result(), 0.333333);
}

// ============================================================================
// Undo / redo
// ============================================================================

#[test]
fn bounded_history_undo_redo_scenario() {
    let mut f = create_calculator(2);
    let c = &mut f.calculator;

    c.perform("add", 1.0, 1.0).unwrap();
    c.perform("add", 2.0, 2.0).unwrap();
    c.perform("multiply", 3.0, 3.0).unwrap();
    let results: Vec<f64> = c.history().items().iter().map(|x| x.result()).collect();
    assert_eq!(results, vec![4.0, 9.0]);

    assert!(c.undo());
    let results: Vec<f64> = c.history().items().iter().map(|x| x.result()).collect();
    assert_eq!(results, vec![2.0, 4.0]);

    assert!(c.redo());
    let results: Vec<f64> = c.history().items().iter().map(|x| x.result()).collect();
    assert_eq!(results, vec![4.0, 9.0]);
}

#[test]
fn n_undos_return_to_empty() {
    let mut f = create_calculator(100);
    let c = &mut f.calculator;
    for i in 0..5 {
        c.perform("add", i as f64, 1.0).unwrap();
    }
    for _ in 0..5 {
        assert!(c.undo());
    }
    assert!(c.history().is_empty());
    assert!(!c.undo());
}

#[test]
fn new_calculation_clears_redo() {
    let mut f = create_calculator(10);
    let c = &mut f.calculator;
    c.perform("add", 1.0, 2.0).unwrap();
    c.perform("add", 3.0, 4.0).unwrap();
    assert!(c.undo());
    c.perform("subtract", 9.0, 1.0).unwrap();

    assert!(!c.redo());
    assert_eq!(operations(c), vec!["add", "subtract"]);
}

#[test]
fn clear_is_undoable() {
    let mut f = create_calculator(10);
    let c = &mut f.calculator;
    c.perform("add", 1.0, 2.0).unwrap();
    c.clear_history();
    assert!(c.history().is_empty());
    assert!(c.undo());
    assert_eq!(c.history().len(), 1);
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn autosave_writes_after_each_calculation() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut c = builder(&dir).auto_save(true).build_calculator().unwrap();
    let path = dir.path().join("history.csv");

    c.perform("add", 1.0, 2.0).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);

    c.perform("add", 3.0, 4.0).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn autosave_failure_does_not_fail_calculation() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let mut c = TallyBuilder::new()
        .auto_save(true)
        .history_file(blocker.join("history.csv"))
        .build_calculator()
        .unwrap();

    assert_eq!(c.perform("add", 1.0, 2.0).unwrap(), 3.0);
    assert_eq!(c.history().len(), 1);
}
