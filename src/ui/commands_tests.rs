#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::db::Database;
use crate::models::{TimeRange, TransactionKind};

fn june_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn setup() -> (App, Database) {
    let db = Database::open_in_memory().unwrap();
    let mut app = App::load(&db).unwrap();
    app.set_reference_date(june_15());
    (app, db)
}

// ── parse_add_args ────────────────────────────────────────────

#[test]
fn test_parse_add_args_with_date() {
    let draft = parse_add_args("expense 2024-06-01 Food 42.50 Weekly groceries", june_15()).unwrap();
    assert_eq!(draft.kind, TransactionKind::Expense);
    assert_eq!(draft.date, "2024-06-01");
    assert_eq!(draft.category, "Food");
    assert_eq!(draft.amount, "42.50");
    assert_eq!(draft.description, "Weekly groceries");
}

#[test]
fn test_parse_add_args_defaults_to_today() {
    let draft = parse_add_args("income Other 2000 Salary", june_15()).unwrap();
    assert_eq!(draft.kind, TransactionKind::Income);
    assert_eq!(draft.date, "2024-06-15");
    assert_eq!(draft.category, "Other");
    assert_eq!(draft.amount, "2000");
}

#[test]
fn test_parse_add_args_missing_fields() {
    assert!(parse_add_args("", june_15()).is_err());
    assert!(parse_add_args("gift Food 10 x", june_15()).is_err());
    assert!(parse_add_args("expense 2024-06-01 Food", june_15()).is_err());
}

#[test]
fn test_parse_add_args_empty_description_left_to_ledger() {
    let draft = parse_add_args("expense Food 10", june_15()).unwrap();
    assert!(draft.description.is_empty());
}

// ── handle_command ────────────────────────────────────────────

#[test]
fn test_add_txn_persists_and_rederives() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-06-01 Housing 1500 Rent", &mut app, &mut db).unwrap();

    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.transactions[0].amount, dec!(-1500));
    assert_eq!(app.view.totals.expenses, dec!(1500));
    assert_eq!(db.load_transactions().unwrap(), app.transactions);
}

#[test]
fn test_add_txn_validation_failure_changes_nothing() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-06-01 Food abc Lunch", &mut app, &mut db).unwrap();
    assert!(app.transactions.is_empty());
    assert!(db.load_transactions().unwrap().is_empty());
    assert!(app.status_message.contains("Invalid amount"));

    handle_command("add-txn expense 2024-06-01 Food 12", &mut app, &mut db).unwrap();
    assert!(app.transactions.is_empty());
    assert!(app.status_message.contains("Description"));
}

#[test]
fn test_delete_requires_confirmation() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-06-02 Food 9 Pizza", &mut app, &mut db).unwrap();
    app.screen = Screen::Transactions;
    handle_command("delete-txn", &mut app, &mut db).unwrap();

    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(
        app.pending_action,
        Some(PendingAction::DeleteTransaction {
            id: 1,
            description: "Pizza".into()
        })
    );
    // Nothing removed until confirmed.
    assert_eq!(app.transactions.len(), 1);
}

#[test]
fn test_delete_outside_transactions_screen() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-06-02 Food 9 Pizza", &mut app, &mut db).unwrap();
    app.screen = Screen::Dashboard;
    handle_command("delete-txn", &mut app, &mut db).unwrap();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_budget_updates_limit_and_saves() {
    let (mut app, mut db) = setup();
    handle_command("budget Food 725.50", &mut app, &mut db).unwrap();

    let food = app.view.breakdown.iter().find(|b| b.category == "Food").unwrap();
    assert_eq!(food.limit, dec!(725.50));
    assert_eq!(app.screen, Screen::Budgets);
    assert_eq!(db.load_budgets().unwrap(), app.budgets);
}

#[test]
fn test_budget_unknown_category() {
    let (mut app, mut db) = setup();
    let before = app.budgets.clone();
    handle_command("budget Travel 100", &mut app, &mut db).unwrap();
    assert_eq!(app.budgets, before);
    assert!(app.status_message.contains("No budget named 'Travel'"));
}

#[test]
fn test_budget_negative_limit_rejected() {
    let (mut app, mut db) = setup();
    let before = app.budgets.clone();
    handle_command("budget Food -10", &mut app, &mut db).unwrap();
    assert_eq!(app.budgets, before);
    assert!(app.status_message.contains("Invalid budget limit"));
}

#[test]
fn test_range_command() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-03-02 Food 5 Bagel", &mut app, &mut db).unwrap();
    assert!(app.view.filtered.is_empty());

    handle_command("range year", &mut app, &mut db).unwrap();
    assert_eq!(app.range, TimeRange::Year);
    assert_eq!(app.view.filtered.len(), 1);

    handle_command("range", &mut app, &mut db).unwrap();
    assert_eq!(app.range, TimeRange::All);

    handle_command("range fortnight", &mut app, &mut db).unwrap();
    assert_eq!(app.range, TimeRange::All);
}

#[test]
fn test_month_navigation() {
    let (mut app, mut db) = setup();
    handle_command("prev-month", &mut app, &mut db).unwrap();
    assert_eq!(app.reference_date, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
    handle_command("next-month", &mut app, &mut db).unwrap();
    handle_command("next-month", &mut app, &mut db).unwrap();
    assert_eq!(app.period_label(), "2024-07");
}

#[test]
fn test_date_command() {
    let (mut app, mut db) = setup();
    handle_command("date 2023-12-31", &mut app, &mut db).unwrap();
    assert_eq!(app.period_label(), "2023-12");
    handle_command("date 12/31/2023", &mut app, &mut db).unwrap();
    assert_eq!(app.period_label(), "2023-12");
    assert!(app.status_message.starts_with("Invalid date"));
}

#[test]
fn test_export_to_unwritable_path_reports_in_status() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-06-02 Food 9 Pizza", &mut app, &mut db).unwrap();

    let result = handle_command("export /nonexistent_dir_xyz/out.csv", &mut app, &mut db);
    assert!(result.is_ok());
    assert!(app.running);
    assert!(app.status_message.starts_with("Export failed:"));
    assert!(app.status_message.contains("/nonexistent_dir_xyz/out.csv"));
}

#[test]
fn test_export_writes_filtered_rows() {
    let (mut app, mut db) = setup();
    handle_command("add-txn expense 2024-06-02 Food 9 Pizza", &mut app, &mut db).unwrap();
    handle_command("add-txn expense 2023-01-02 Food 4 Bagel", &mut app, &mut db).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("june.csv");
    handle_command(&format!("export {}", path.display()), &mut app, &mut db).unwrap();

    assert!(app.status_message.starts_with("Exported 1 transactions"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("Pizza"));
    assert!(!written.contains("Bagel"));
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    handle_command("budgt", &mut app, &mut db).unwrap();
    assert!(app.status_message.starts_with("Unknown command: :budgt"));
    assert!(app.status_message.contains("Did you mean :budget"));
}

#[test]
fn test_quit() {
    let (mut app, mut db) = setup();
    handle_command("q", &mut app, &mut db).unwrap();
    assert!(!app.running);
}
