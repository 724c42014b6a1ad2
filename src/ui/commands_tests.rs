#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use tempfile::TempDir;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::models;
use crate::settings::Settings;
use crate::store::Store;

fn setup() -> (TempDir, Store, App) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::load(&dir.path().join("expenses.json")).unwrap();
    let mut app = App::new(&Settings::default());
    app.refresh(&store);
    (dir, store, app)
}

// ── split_add_args ────────────────────────────────────────────

#[test]
fn test_split_add_args_with_date() {
    let (amount, category, date) = split_add_args("50 Food 2024-01-15").unwrap();
    assert_eq!(amount, "50");
    assert_eq!(category, "Food");
    assert_eq!(date, "2024-01-15");
}

#[test]
fn test_split_add_args_multi_word_category() {
    let (_, category, date) = split_add_args("12.5 Eating out 2024-03-01").unwrap();
    assert_eq!(category, "Eating out");
    assert_eq!(date, "2024-03-01");
}

#[test]
fn test_split_add_args_defaults_to_today() {
    let (_, category, date) = split_add_args("8 Coffee shop").unwrap();
    assert_eq!(category, "Coffee shop");
    assert_eq!(date, models::today());
}

#[test]
fn test_split_add_args_needs_category() {
    assert!(split_add_args("50").is_none());
    assert!(split_add_args("").is_none());
}

// ── handle_command ────────────────────────────────────────────

#[test]
fn test_add_command_persists() {
    let (_dir, mut store, mut app) = setup();
    handle_command("add 50.00 Food 2024-01-15", &mut app, &mut store).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(app.total, dec!(50.00));
    assert_eq!(crate::summary::totals_by_category(store.expenses())["Food"], dec!(50.00));
}

#[test]
fn test_add_command_reports_invalid_amount() {
    let (_dir, mut store, mut app) = setup();
    handle_command("add abc Food 2024-01-15", &mut app, &mut store).unwrap();
    assert!(store.is_empty());
    assert!(app.status_message.contains("amount must be a number"));
}

#[test]
fn test_add_command_without_args_opens_form() {
    let (_dir, mut store, mut app) = setup();
    handle_command("add", &mut app, &mut store).unwrap();
    assert_eq!(app.input_mode, InputMode::Form);
}

#[test]
fn test_delete_command_by_number() {
    let (_dir, mut store, mut app) = setup();
    store.add("1", "Food", "2024-01-01").unwrap();
    store.add("2", "Bills", "2024-01-02").unwrap();
    app.refresh(&store);

    handle_command("delete #2", &mut app, &mut store).unwrap();
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense { position: 1, .. })
    ));
}

#[test]
fn test_delete_command_rejects_zero() {
    let (_dir, mut store, mut app) = setup();
    handle_command("delete 0", &mut app, &mut store).unwrap();
    assert!(app.pending_action.is_none());
    assert!(app.status_message.starts_with("Invalid expense number"));
}

#[test]
fn test_stats_command_on_empty_store() {
    let (_dir, mut store, mut app) = setup();
    handle_command("stats", &mut app, &mut store).unwrap();
    assert_eq!(app.screen, Screen::Statistics);
    assert_eq!(app.status_message, "No expenses to show statistics.");
}

#[test]
fn test_export_command_writes_file() {
    let (dir, mut store, mut app) = setup();
    store.add("5", "Food", "2024-01-01").unwrap();
    let path = dir.path().join("out.csv");

    handle_command(&format!("export {}", path.display()), &mut app, &mut store).unwrap();
    assert!(path.exists());
    assert!(app.status_message.starts_with("Exported 1 expenses"));
}

#[test]
fn test_unknown_command_suggests_closest() {
    let (_dir, mut store, mut app) = setup();
    handle_command("delet", &mut app, &mut store).unwrap();
    assert_eq!(
        app.status_message,
        "Unknown command: :delet. Did you mean :delete?"
    );
}

#[test]
fn test_quit_command() {
    let (_dir, mut store, mut app) = setup();
    handle_command("q", &mut app, &mut store).unwrap();
    assert!(!app.running);
}
