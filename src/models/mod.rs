mod budget;
mod time_range;
mod transaction;

pub use budget::{Budget, DEFAULT_BUDGETS};
pub use time_range::{month_key, TimeRange};
pub use transaction::{Transaction, TransactionKind};
