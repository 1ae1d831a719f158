use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seed list written on first run, in display order.
pub const DEFAULT_BUDGETS: &[(&str, i64)] = &[
    ("Housing", 1500),
    ("Food", 600),
    ("Transportation", 300),
    ("Entertainment", 200),
    ("Other", 300),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    /// Monthly ceiling, never negative.
    pub limit: Decimal,
}

impl Budget {
    pub fn new(category: String, limit: Decimal) -> Self {
        Self { category, limit }
    }

    pub fn defaults() -> Vec<Budget> {
        DEFAULT_BUDGETS
            .iter()
            .map(|(name, limit)| Budget::new((*name).to_string(), Decimal::from(*limit)))
            .collect()
    }

    /// Find a budget by its exact category name.
    pub fn find_by_category<'a>(budgets: &'a [Budget], category: &str) -> Option<&'a Budget> {
        budgets.iter().find(|b| b.category == category)
    }
}
