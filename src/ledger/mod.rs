//! Write path for the transaction and budget lists.
//!
//! Each command borrows the current list and returns a fresh one, so a failed
//! command can never leave a half-applied change behind.

mod errors;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Budget, Transaction, TransactionKind};

pub use errors::{LedgerError, Result};

/// Raw form input for a new transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub kind: TransactionKind,
}

pub fn next_id(transactions: &[Transaction]) -> i64 {
    transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

pub fn add_transaction(
    transactions: &[Transaction],
    draft: &TransactionDraft,
) -> Result<Vec<Transaction>> {
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(LedgerError::EmptyDescription);
    }

    let magnitude = parse_money(&draft.amount)
        .ok_or_else(|| LedgerError::InvalidAmount(draft.amount.clone()))?;
    if magnitude.is_zero() {
        return Err(LedgerError::InvalidAmount(draft.amount.clone()));
    }

    let date = NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(draft.date.clone()))?;

    let category = draft.category.trim();
    if category.is_empty() {
        return Err(LedgerError::EmptyCategory);
    }

    let txn = Transaction {
        id: next_id(transactions),
        date: date.format("%Y-%m-%d").to_string(),
        description: description.to_string(),
        amount: draft.kind.signed(magnitude),
        category: category.to_string(),
    };
    log::debug!(
        "adding transaction #{} {} {} in {}",
        txn.id,
        txn.date,
        txn.amount,
        txn.category
    );

    let mut next = Vec::with_capacity(transactions.len() + 1);
    next.extend_from_slice(transactions);
    next.push(txn);
    Ok(next)
}

/// Remove the transaction with `id`. Unknown ids leave the list as it was.
pub fn delete_transaction(transactions: &[Transaction], id: i64) -> Vec<Transaction> {
    if !transactions.iter().any(|t| t.id == id) {
        log::debug!("delete: no transaction with id {id}");
    }
    transactions.iter().filter(|t| t.id != id).cloned().collect()
}

/// Set the monthly limit for `category`. Unknown categories leave the list as it was.
pub fn update_budget_limit(
    budgets: &[Budget],
    category: &str,
    new_limit: &str,
) -> Result<Vec<Budget>> {
    if Budget::find_by_category(budgets, category).is_none() {
        log::debug!("update: no budget for category '{category}'");
        return Ok(budgets.to_vec());
    }

    let limit = parse_money(new_limit)
        .filter(|l| *l >= Decimal::ZERO)
        .ok_or_else(|| LedgerError::InvalidLimit(new_limit.to_string()))?;

    Ok(budgets
        .iter()
        .map(|b| {
            if b.category == category {
                Budget::new(b.category.clone(), limit)
            } else {
                b.clone()
            }
        })
        .collect())
}

/// Largest magnitude accepted for an amount or a limit. Sums of many such
/// values stay well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0); // 1_000_000_000_000_000

/// Parse a user-typed amount, tolerating a leading `$` and thousands separators.
/// Magnitudes above [`MAX_AMOUNT`] are refused.
pub fn parse_money(input: &str) -> Option<Decimal> {
    let cleaned = input.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|d| d.abs() <= MAX_AMOUNT)
}

#[cfg(test)]
mod tests;
