#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::fs;
use tempfile::TempDir;

use super::*;
use crate::store::StoreError;

fn setup() -> (TempDir, Store, Settings) {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::load(&dir.path().join("expenses.json")).unwrap();
    store.add("25", "Food", "2024-01-01").unwrap();
    store.add("75", "Bills", "2024-01-02").unwrap();
    store.add("10", "Transport", "2024-01-03").unwrap();
    (dir, store, Settings::default())
}

fn categories(store: &Store) -> Vec<&str> {
    store.expenses().iter().map(|e| e.category.as_str()).collect()
}

// ── to_position ───────────────────────────────────────────────

#[test]
fn test_to_position_is_one_based() {
    assert_eq!(to_position(1).unwrap(), 0);
    assert_eq!(to_position(3).unwrap(), 2);
    assert!(to_position(0).is_err());
}

// ── add ───────────────────────────────────────────────────────

#[test]
fn test_add_defaults_date_to_today() {
    let (_dir, mut store, settings) = setup();
    let command = Command::Add {
        amount: "12.50".into(),
        category: "Coffee".into(),
        date: None,
    };
    as_cli(command, &mut store, &settings).unwrap();

    let added = store.get(3).unwrap();
    assert_eq!(added.amount, dec!(12.50));
    assert_eq!(added.date, models::today());
    assert_eq!(Store::load(store.path()).unwrap().len(), 4);
}

#[test]
fn test_add_invalid_input_is_an_error() {
    let (_dir, mut store, settings) = setup();
    let command = Command::Add {
        amount: "abc".into(),
        category: "Food".into(),
        date: Some("2024-01-01".into()),
    };
    let err = as_cli(command, &mut store, &settings).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::Validation(_))
    ));
    assert_eq!(store.len(), 3);
}

// ── edit ──────────────────────────────────────────────────────

#[test]
fn test_edit_targets_displayed_number() {
    let (_dir, mut store, settings) = setup();
    let command = Command::Edit {
        index: 2,
        amount: "80".into(),
        category: "Rent".into(),
        date: "2024-02-01".into(),
    };
    as_cli(command, &mut store, &settings).unwrap();

    assert_eq!(categories(&store), vec!["Food", "Rent", "Transport"]);
    let reloaded = Store::load(store.path()).unwrap();
    assert_eq!(reloaded.get(1).unwrap().amount, dec!(80));
}

#[test]
fn test_edit_zero_is_rejected() {
    let (_dir, mut store, settings) = setup();
    let command = Command::Edit {
        index: 0,
        amount: "80".into(),
        category: "Rent".into(),
        date: "2024-02-01".into(),
    };
    assert!(as_cli(command, &mut store, &settings).is_err());
    assert_eq!(categories(&store), vec!["Food", "Bills", "Transport"]);
}

#[test]
fn test_edit_past_end_is_index_error() {
    let (_dir, mut store, settings) = setup();
    let command = Command::Edit {
        index: 4,
        amount: "80".into(),
        category: "Rent".into(),
        date: "2024-02-01".into(),
    };
    let err = as_cli(command, &mut store, &settings).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::Index { position: 3, len: 3 })
    ));
}

// ── delete ────────────────────────────────────────────────────

#[test]
fn test_delete_targets_displayed_number() {
    let (_dir, mut store, settings) = setup();
    as_cli(Command::Delete { index: 1 }, &mut store, &settings).unwrap();

    assert_eq!(categories(&store), vec!["Bills", "Transport"]);
    assert_eq!(Store::load(store.path()).unwrap().len(), 2);
}

#[test]
fn test_delete_zero_is_rejected() {
    let (_dir, mut store, settings) = setup();
    assert!(as_cli(Command::Delete { index: 0 }, &mut store, &settings).is_err());
    assert_eq!(store.len(), 3);
}

// ── clear ─────────────────────────────────────────────────────

#[test]
fn test_clear_without_yes_refuses() {
    let (_dir, mut store, settings) = setup();
    let before = fs::read_to_string(store.path()).unwrap();

    let err = as_cli(Command::Clear { yes: false }, &mut store, &settings).unwrap_err();
    assert!(err.to_string().contains("--yes"));
    assert_eq!(store.len(), 3);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn test_clear_with_yes_empties_file() {
    let (_dir, mut store, settings) = setup();
    as_cli(Command::Clear { yes: true }, &mut store, &settings).unwrap();

    assert!(store.is_empty());
    assert!(Store::load(store.path()).unwrap().is_empty());
}

// ── reports ───────────────────────────────────────────────────

#[test]
fn test_reports_on_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = Store::load(&dir.path().join("expenses.json")).unwrap();
    let settings = Settings::default();

    as_cli(Command::List, &mut store, &settings).unwrap();
    as_cli(Command::Total, &mut store, &settings).unwrap();
    as_cli(Command::Stats, &mut store, &settings).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn test_reports_with_overflowing_total() {
    let (_dir, mut store, settings) = setup();
    store.add("70000000000000000000000000000", "Bills", "2024-03-01").unwrap();
    store.add("70000000000000000000000000000", "Bills", "2024-03-02").unwrap();

    as_cli(Command::List, &mut store, &settings).unwrap();
    as_cli(Command::Total, &mut store, &settings).unwrap();
    as_cli(Command::Stats, &mut store, &settings).unwrap();
}

#[test]
fn test_export_writes_csv() {
    let (dir, mut store, settings) = setup();
    let path = dir.path().join("out.csv");
    as_cli(Command::Export { path: path.clone() }, &mut store, &settings).unwrap();

    let csv = fs::read_to_string(&path).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("#,Date,Category,Amount"));
}
