#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn draft(kind: TransactionKind, description: &str, amount: &str, category: &str) -> TransactionDraft {
    TransactionDraft {
        date: "2024-06-01".into(),
        description: description.into(),
        amount: amount.into(),
        category: category.into(),
        kind,
    }
}

fn existing() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            date: "2024-05-02".into(),
            description: "Paycheck".into(),
            amount: dec!(3200),
            category: "Other".into(),
        },
        Transaction {
            id: 4,
            date: "2024-05-09".into(),
            description: "Groceries".into(),
            amount: dec!(-86.40),
            category: "Food".into(),
        },
    ]
}

// ── add_transaction ───────────────────────────────────────────

#[test]
fn test_add_rent_expense_is_negative() {
    let before = existing();
    let after = add_transaction(
        &before,
        &draft(TransactionKind::Expense, "Rent", "1500", "Housing"),
    )
    .unwrap();

    assert_eq!(after.len(), before.len() + 1);
    let added: Vec<&Transaction> = after.iter().filter(|t| t.description == "Rent").collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].amount, dec!(-1500));
    assert_eq!(added[0].category, "Housing");
    assert_eq!(added[0].date, "2024-06-01");
}

#[test]
fn test_add_income_is_positive() {
    let after = add_transaction(
        &[],
        &draft(TransactionKind::Income, "Salary", "2000", "Other"),
    )
    .unwrap();
    assert_eq!(after[0].amount, dec!(2000));
    assert!(after[0].is_income());
}

#[test]
fn test_add_sign_follows_kind_not_input() {
    let after = add_transaction(
        &[],
        &draft(TransactionKind::Expense, "Refund typed as negative", "-20", "Food"),
    )
    .unwrap();
    assert_eq!(after[0].amount, dec!(-20));

    let after = add_transaction(
        &[],
        &draft(TransactionKind::Income, "Negative income", "-20", "Other"),
    )
    .unwrap();
    assert_eq!(after[0].amount, dec!(20));
}

#[test]
fn test_add_appends_and_assigns_fresh_id() {
    let before = existing();
    let after = add_transaction(
        &before,
        &draft(TransactionKind::Expense, "Bus pass", "45.00", "Transportation"),
    )
    .unwrap();
    assert_eq!(&after[..2], &before[..]);
    assert_eq!(after[2].id, 5);
    assert!(before.iter().all(|t| t.id != after[2].id));
}

#[test]
fn test_add_first_id_is_one() {
    let after = add_transaction(&[], &draft(TransactionKind::Expense, "Tea", "3", "Food")).unwrap();
    assert_eq!(after[0].id, 1);
}

#[test]
fn test_add_trims_description_and_category() {
    let after = add_transaction(
        &[],
        &draft(TransactionKind::Expense, "  Movie night ", "18", " Entertainment "),
    )
    .unwrap();
    assert_eq!(after[0].description, "Movie night");
    assert_eq!(after[0].category, "Entertainment");
}

#[test]
fn test_add_accepts_currency_formatting() {
    let after = add_transaction(
        &[],
        &draft(TransactionKind::Income, "Bonus", "$1,250.75", "Other"),
    )
    .unwrap();
    assert_eq!(after[0].amount, dec!(1250.75));
}

#[test]
fn test_add_rejects_empty_description() {
    let err = add_transaction(
        &existing(),
        &draft(TransactionKind::Expense, "   ", "10", "Food"),
    )
    .unwrap_err();
    assert_eq!(err, LedgerError::EmptyDescription);
}

#[test]
fn test_add_rejects_non_numeric_amount() {
    for bad in ["", "abc", "12..5", "1e5x", "NaN"] {
        let err = add_transaction(
            &existing(),
            &draft(TransactionKind::Expense, "Lunch", bad, "Food"),
        )
        .unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount(bad.to_string()));
    }
}

#[test]
fn test_add_rejects_zero_amount() {
    let err = add_transaction(&[], &draft(TransactionKind::Income, "Nothing", "0.00", "Other"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
}

#[test]
fn test_add_rejects_out_of_range_amount() {
    let huge = "60000000000000000000000000000";
    let err = add_transaction(&existing(), &draft(TransactionKind::Expense, "Yacht", huge, "Other"))
        .unwrap_err();
    assert_eq!(err, LedgerError::InvalidAmount(huge.into()));

    let at_cap = add_transaction(
        &existing(),
        &draft(TransactionKind::Income, "Windfall", "1000000000000000", "Other"),
    )
    .unwrap();
    assert_eq!(at_cap.last().unwrap().amount, MAX_AMOUNT);
}

#[test]
fn test_add_rejects_malformed_date() {
    for bad in ["2024/06/01", "06-01-2024", "2024-13-01", "yesterday"] {
        let mut d = draft(TransactionKind::Expense, "Lunch", "12", "Food");
        d.date = bad.into();
        let err = add_transaction(&[], &d).unwrap_err();
        assert_eq!(err, LedgerError::InvalidDate(bad.to_string()));
    }
}

#[test]
fn test_add_canonicalizes_date() {
    let mut d = draft(TransactionKind::Expense, "Lunch", "12", "Food");
    d.date = "2024-6-5".into();
    let after = add_transaction(&[], &d).unwrap();
    assert_eq!(after[0].date, "2024-06-05");
}

#[test]
fn test_add_rejects_empty_category() {
    let err = add_transaction(&[], &draft(TransactionKind::Expense, "Lunch", "12", " "))
        .unwrap_err();
    assert_eq!(err, LedgerError::EmptyCategory);
}

#[test]
fn test_add_failure_leaves_list_unchanged() {
    let before = existing();
    let snapshot = before.clone();
    let _ = add_transaction(&before, &draft(TransactionKind::Expense, "", "x", "Food"));
    assert_eq!(before, snapshot);
}

#[test]
fn test_add_allows_unbudgeted_category() {
    let after = add_transaction(&[], &draft(TransactionKind::Expense, "Vet", "80", "Pets")).unwrap();
    assert_eq!(after[0].category, "Pets");
}

// ── delete_transaction ────────────────────────────────────────

#[test]
fn test_delete_existing() {
    let after = delete_transaction(&existing(), 4);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, 1);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let before = existing();
    let after = delete_transaction(&before, 999);
    assert_eq!(after, before);
}

#[test]
fn test_delete_from_empty() {
    assert!(delete_transaction(&[], 1).is_empty());
}

#[test]
fn test_ids_not_reused_after_delete_of_earlier_entry() {
    let after = delete_transaction(&existing(), 1);
    assert_eq!(next_id(&after), 5);
}

// ── update_budget_limit ───────────────────────────────────────

#[test]
fn test_update_known_category_only_touches_that_entry() {
    let before = Budget::defaults();
    let after = update_budget_limit(&before, "Food", "750").unwrap();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        assert_eq!(old.category, new.category);
        if old.category == "Food" {
            assert_eq!(new.limit, dec!(750));
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_update_unknown_category_is_noop() {
    let before = Budget::defaults();
    let after = update_budget_limit(&before, "Travel", "100").unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_update_unknown_category_ignores_bad_limit() {
    let before = Budget::defaults();
    let after = update_budget_limit(&before, "Travel", "lots").unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_update_rejects_negative_limit() {
    let err = update_budget_limit(&Budget::defaults(), "Food", "-5").unwrap_err();
    assert_eq!(err, LedgerError::InvalidLimit("-5".into()));
}

#[test]
fn test_update_rejects_non_numeric_limit() {
    let err = update_budget_limit(&Budget::defaults(), "Food", "lots").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidLimit(_)));
}

#[test]
fn test_update_rejects_out_of_range_limit() {
    let err = update_budget_limit(&Budget::defaults(), "Food", "1e20").unwrap_err();
    assert!(matches!(err, LedgerError::InvalidLimit(_)));
    let err = update_budget_limit(&Budget::defaults(), "Food", "2000000000000000").unwrap_err();
    assert_eq!(err, LedgerError::InvalidLimit("2000000000000000".into()));
}

#[test]
fn test_update_allows_zero_limit() {
    let after = update_budget_limit(&Budget::defaults(), "Entertainment", "0").unwrap();
    let ent = Budget::find_by_category(&after, "Entertainment").unwrap();
    assert_eq!(ent.limit, Decimal::ZERO);
}

// ── parse_money ───────────────────────────────────────────────

#[test]
fn test_parse_money() {
    assert_eq!(parse_money("42"), Some(dec!(42)));
    assert_eq!(parse_money(" 4.50 "), Some(dec!(4.50)));
    assert_eq!(parse_money("$1,000"), Some(dec!(1000)));
    assert_eq!(parse_money("-3.25"), Some(dec!(-3.25)));
    assert_eq!(parse_money(""), None);
    assert_eq!(parse_money("$"), None);
    assert_eq!(parse_money("ten"), None);
    assert_eq!(parse_money("-1000000000000001"), None);
}
