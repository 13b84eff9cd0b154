#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, Screen};
use super::commands::handle_command;
use crate::ledger::Ledger;
use crate::models::{Category, TransactionId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn app() -> App {
    App::new(Ledger::new(Category::defaults()), date(2024, 3, 15))
}

fn run(app: &mut App, input: &str) {
    handle_command(input, app).unwrap();
}

// ── Adding ────────────────────────────────────────────────────

#[test]
fn test_add_txn_records_and_selects() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12.50 Food Lunch with team");

    assert_eq!(app.ledger.len(), 1);
    let txn = app.selected_transaction().unwrap();
    assert_eq!(txn.description, "Lunch with team");
    assert_eq!(txn.category, "Food");
    assert_eq!(txn.amount, dec!(12.50));
    assert_eq!(app.status_message, "Added #1: Lunch with team $12.50 (Food)");
    assert!(app.last_failure.is_none());
}

#[test]
fn test_add_txn_tolerates_repeated_whitespace() {
    let mut app = app();
    run(&mut app, "add-txn  2024-03-10  12\tFood   Lunch  with team");

    assert!(app.last_failure.is_none());
    let txn = app.selected_transaction().unwrap();
    assert_eq!(txn.date, date(2024, 3, 10));
    assert_eq!(txn.amount, dec!(12));
    assert_eq!(txn.category, "Food");
    assert_eq!(txn.description, "Lunch with team");
}

#[test]
fn test_add_txn_rejects_amount_over_limit() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 70000000000000000000000000000 Food Lunch");
    assert!(app.ledger.is_empty());
    assert_eq!(
        app.last_failure.as_deref(),
        Some("Invalid amount: amount cannot exceed $1,000,000,000.00")
    );
}

#[test]
fn test_add_txn_category_is_case_insensitive() {
    let mut app = app();
    run(&mut app, "a 2024-03-10 $40 transportation Bus pass");
    assert_eq!(app.selected_transaction().unwrap().category, "Transportation");
}

#[test]
fn test_add_txn_bad_amount_fails() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 -5 Food Lunch");
    assert!(app.ledger.is_empty());
    assert!(app.last_failure.as_deref().unwrap().starts_with("Invalid amount"));
}

#[test]
fn test_add_txn_unknown_category_fails() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 5 Pets Dog food");
    assert!(app.ledger.is_empty());
    assert!(app.last_failure.as_deref().unwrap().contains("Unknown category"));
}

#[test]
fn test_add_txn_missing_description_fails() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 5 Food");
    assert!(app.ledger.is_empty());
    assert!(app.last_failure.is_some());
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_budget_sets_and_clears() {
    let mut app = app();
    run(&mut app, "budget Food 500");
    assert_eq!(app.status_message, "Budget set: Food = $500.00");
    assert_eq!(app.ledger.budget_for("Food").unwrap().amount, dec!(500));

    run(&mut app, "budget food 0");
    assert_eq!(app.status_message, "Budget cleared: Food");
    assert!(!app.ledger.budget_for("Food").unwrap().is_set());
}

#[test]
fn test_budget_negative_fails() {
    let mut app = app();
    run(&mut app, "budget Food -1");
    assert!(app.last_failure.as_deref().unwrap().contains("cannot be negative"));
}

#[test]
fn test_budget_rejection_opens_alert() {
    let mut app = app();
    run(&mut app, "budget Food 100");
    run(&mut app, "add-txn 2024-03-10 80 Food Groceries");
    run(&mut app, "add-txn 2024-03-11 25 Food Dinner");

    assert_eq!(app.ledger.len(), 1);
    let alert = app.alert.as_deref().unwrap();
    assert!(alert.starts_with("Insufficient budget for Food! Please add funds"));
    assert!(alert.contains("$25.00 requested, $20.00 available"));
    assert!(app.last_failure.is_some());
}

// ── Editing ───────────────────────────────────────────────────

#[test]
fn test_edits_apply_to_selected_transaction() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12 Food Lunch");
    run(&mut app, "rename Team lunch");
    run(&mut app, "recat entertainment");
    run(&mut app, "amount 15.25");
    run(&mut app, "redate 2024-02-01");

    let txn = app.ledger.get(TransactionId(1)).unwrap();
    assert_eq!(txn.description, "Team lunch");
    assert_eq!(txn.category, "Entertainment");
    assert_eq!(txn.amount, dec!(15.25));
    assert_eq!(txn.date, date(2024, 2, 1));
}

#[test]
fn test_edit_without_selection_fails() {
    let mut app = app();
    run(&mut app, "amount 5");
    assert!(app.last_failure.as_deref().unwrap().contains("No transaction selected"));
}

#[test]
fn test_edit_invalid_value_leaves_transaction() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12 Food Lunch");
    run(&mut app, "redate 2024-13-01");
    assert!(app.last_failure.as_deref().unwrap().starts_with("Invalid date"));
    assert_eq!(app.ledger.get(TransactionId(1)).unwrap().date, date(2024, 3, 10));
}

#[test]
fn test_rename_without_args_enters_editing() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12 Food Lunch");
    run(&mut app, "rename");
    assert_eq!(app.input_mode, InputMode::Editing);
    assert_eq!(app.command_input, "Lunch");
}

#[test]
fn test_select_moves_cursor() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12 Food Lunch");
    run(&mut app, "add-txn 2024-03-12 30 Shopping Shoes");
    run(&mut app, "select #1");
    assert_eq!(app.screen, Screen::Transactions);
    assert_eq!(app.selected_transaction().unwrap().id, TransactionId(1));

    run(&mut app, "select 9");
    assert_eq!(app.last_failure.as_deref(), Some("Transaction #9 not found"));
}

// ── Deleting ──────────────────────────────────────────────────

#[test]
fn test_delete_asks_for_confirmation() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12 Food Lunch");
    run(&mut app, "delete-txn");
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Lunch'?");
    assert_eq!(app.ledger.len(), 1);

    app.confirm_pending();
    assert!(app.ledger.is_empty());
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "Deleted: Lunch");
}

#[test]
fn test_delete_cancel_keeps_transaction() {
    let mut app = app();
    run(&mut app, "add-txn 2024-03-10 12 Food Lunch");
    run(&mut app, "delete-txn 1");
    app.cancel_pending();
    assert_eq!(app.ledger.len(), 1);
    assert!(app.pending_action.is_none());
}

#[test]
fn test_delete_by_unknown_id_fails() {
    let mut app = app();
    run(&mut app, "delete-txn 4");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.last_failure.is_some());
}

// ── Navigation ────────────────────────────────────────────────

#[test]
fn test_month_commands() {
    let mut app = app();
    run(&mut app, "month 2023-12");
    assert_eq!(app.reference_date, date(2023, 12, 1));
    run(&mut app, "next-month");
    assert_eq!(app.reference_date, date(2024, 1, 1));
    run(&mut app, "prev-month");
    run(&mut app, "prev-month");
    assert_eq!(app.reference_date, date(2023, 11, 1));

    run(&mut app, "month 07");
    assert_eq!(app.reference_date, date(2023, 7, 1));

    run(&mut app, "month nope");
    assert!(app.last_failure.is_some());
}

#[test]
fn test_screen_commands() {
    let mut app = app();
    run(&mut app, "insights");
    assert_eq!(app.screen, Screen::Insights);
    run(&mut app, "b");
    assert_eq!(app.screen, Screen::Budgets);
    run(&mut app, "quit");
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests_closest() {
    let mut app = app();
    run(&mut app, "budgt Food 5");
    assert_eq!(
        app.last_failure.as_deref(),
        Some("Unknown command: :budgt. Did you mean :budget?")
    );
}
