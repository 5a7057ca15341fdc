//! Executor and typed API.

use std::sync::Arc;
use std::thread;

use crate::common::*;
use tally::prelude::*;

#[test]
fn typed_api_session() {
    let (_dir, tally) = create_tally();

    assert_eq!(tally.calculate("add", 2.0, 3.0).unwrap(), 5.0);
    assert_eq!(tally.calculate("root", -8.0, 3.0).unwrap(), -2.0);
    assert!(tally.undo().unwrap());
    assert_eq!(tally.history().unwrap().len(), 1);
    assert!(tally.redo().unwrap());
    assert_eq!(tally.history().unwrap().len(), 2);

    let info = tally.info().unwrap();
    assert_eq!(info.history_len, 2);
    assert_eq!(info.max_history_size, 1000);
    assert_eq!(info.precision, Some(6));
    assert!(!info.auto_save);
}

#[test]
fn operations_are_sorted() {
    let (_dir, tally) = create_tally();
    let names = tally.operations().unwrap();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 10);
}

#[test]
fn output_serializes_as_tagged_json() {
    let (_dir, tally) = create_tally();
    let output = tally
        .executor()
        .execute(Command::Calculate {
            operation: "multiply".into(),
            a: 6.0,
            b: 7.0,
        })
        .unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "float", "value": 42.0 }));

    let history = tally.executor().execute(Command::History).unwrap();
    let json = serde_json::to_value(&history).unwrap();
    assert_eq!(json["type"], "calculations");
    assert_eq!(json["value"][0]["operation"], "multiply");
    assert_eq!(json["value"][0]["result"], 42.0);
}

#[test]
fn concurrent_clients_share_one_history() {
    let dir = tempfile::TempDir::new().unwrap();
    let tally = Arc::new(
        builder(&dir)
            .auto_save(true)
            .max_history_size(1000)
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tally = Arc::clone(&tally);
            thread::spawn(move || {
                for i in 0..25 {
                    tally.calculate("add", t as f64, i as f64).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(tally.history().unwrap().len(), 100);
    assert_eq!(tally.load().unwrap(), 100);
}
