//! Derivation of display aggregates from the raw transaction log and budget table.
//!
//! Everything here is a pure function of its arguments. Callers own the lists
//! and call [`derive_view`] again after every change.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, TimeRange, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    /// Magnitude of outflows, always >= 0.
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    /// `limit - spent`; negative when over budget.
    pub remaining: Decimal,
}

impl CategoryBreakdown {
    /// Fraction of the limit used. Zero when no limit is set.
    pub fn ratio(&self) -> f64 {
        if self.limit > Decimal::ZERO {
            // A tiny limit can overflow the quotient; treat that as maximally over.
            self.spent
                .checked_div(self.limit)
                .and_then(|r| r.to_f64())
                .unwrap_or(f64::MAX)
        } else {
            0.0
        }
    }

    pub fn is_over(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub filtered: Vec<Transaction>,
    pub totals: Totals,
    pub breakdown: Vec<CategoryBreakdown>,
}

pub fn derive_view(
    transactions: &[Transaction],
    budgets: &[Budget],
    range: TimeRange,
    reference: NaiveDate,
) -> View {
    let filtered = filter_transactions(transactions, range, reference);
    let totals = compute_totals(&filtered);
    let breakdown = category_breakdown(&filtered, budgets);
    log::trace!(
        "derived {range} view at {reference}: {} of {} txns, {} budget rows",
        filtered.len(),
        transactions.len(),
        breakdown.len()
    );
    View {
        filtered,
        totals,
        breakdown,
    }
}

/// Keep transactions whose ISO date starts with the range prefix.
///
/// This is a plain string-prefix match, so dates must be stored as
/// zero-padded `YYYY-MM-DD`. Insertion order is preserved.
pub fn filter_transactions(
    transactions: &[Transaction],
    range: TimeRange,
    reference: NaiveDate,
) -> Vec<Transaction> {
    match range.prefix(reference) {
        Some(prefix) => transactions
            .iter()
            .filter(|t| t.date.starts_with(&prefix))
            .cloned()
            .collect(),
        None => transactions.to_vec(),
    }
}

pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let income: Decimal = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expenses: Decimal = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.abs_amount())
        .sum();
    Totals {
        income,
        expenses,
        net: income - expenses,
    }
}

/// One row per budget, in budget order. Transactions in categories with no
/// budget are skipped here but still count in [`compute_totals`].
pub fn category_breakdown(transactions: &[Transaction], budgets: &[Budget]) -> Vec<CategoryBreakdown> {
    budgets
        .iter()
        .map(|budget| {
            let spent: Decimal = transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == budget.category)
                .map(|t| t.abs_amount())
                .sum();
            CategoryBreakdown {
                category: budget.category.clone(),
                spent,
                limit: budget.limit,
                remaining: budget.limit - spent,
            }
        })
        .collect()
}

/// Expenses whose category matches no budget.
pub fn uncategorized_spending(transactions: &[Transaction], budgets: &[Budget]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_expense() && Budget::find_by_category(budgets, &t.category).is_none())
        .map(|t| t.abs_amount())
        .sum()
}
