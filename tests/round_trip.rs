use docket::io::storage::{JsonDirStore, KeyValueStore, TODOS_KEY};
use docket::ops::store::{Decision, SequentialIds, Store};
use pretty_assertions::assert_eq;
use std::fs;

use chrono::NaiveDate;

fn at(d: u32, h: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

#[test]
fn store_survives_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let now = at(1, 8);

    let mut store = Store::open(JsonDirStore::new(tmp.path()), SequentialIds::new("a")).unwrap();
    let milk = store.add_at("Buy milk", Some(at(10, 9)), now).unwrap();
    let mom = store.add_at("Call mom", None, now).unwrap();
    store.add_at("Pay rent", Some(at(31, 23)), now).unwrap();
    store.toggle(&mom).unwrap();
    store.reorder(2, 0).unwrap();
    store.remove_with(&milk, &mut Decision::Confirm).unwrap();
    let before = store.snapshot().clone();

    let reopened = Store::open(JsonDirStore::new(tmp.path()), SequentialIds::new("b")).unwrap();
    assert_eq!(reopened.snapshot(), &before);
    let titles: Vec<_> = reopened.todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay rent", "Call mom"]);
    assert!(reopened.todos()[1].completed);
    assert_eq!(reopened.todos()[1].due, None);
}

#[test]
fn hand_written_file_loads() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todos.json"),
        r#"[
  {"id": "x1", "title": "Buy milk", "completed": false, "dueDate": "2024-03-10T09:00:00"},
  {"id": "x2", "title": "Call mom", "completed": true}
]"#,
    )
    .unwrap();

    let store = Store::open(JsonDirStore::new(tmp.path()), SequentialIds::new("n")).unwrap();
    assert_eq!(store.todos().len(), 2);
    assert_eq!(store.todos()[0].due, Some(at(10, 9)));

    // Saved back out in the same shape
    let raw = JsonDirStore::new(tmp.path()).get(TODOS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[1]["completed"], true);
    assert!(value[1].get("dueDate").is_none());
}

#[test]
fn corrupt_file_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), "{not json").unwrap();
    assert!(Store::open(JsonDirStore::new(tmp.path()), SequentialIds::new("n")).is_err());
}
