use anyhow::Result;
use chrono::{Local, Months, NaiveDate};

use crate::db::Database;
use crate::engine::{self, View};
use crate::models::*;
use crate::ui::util::ListCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions, Self::Budgets]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Query
    pub(crate) range: TimeRange,
    pub(crate) reference_date: NaiveDate,

    // Canonical lists, owned here and replaced whole on every change
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) budgets: Vec<Budget>,

    // Derived from the lists above; never edited directly
    pub(crate) view: View,

    pub(crate) transaction_cursor: ListCursor,
    pub(crate) budget_cursor: ListCursor,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        reference_date: NaiveDate,
    ) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            range: TimeRange::default(),
            reference_date,

            transactions,
            budgets,
            view: View::default(),

            transaction_cursor: ListCursor::default(),
            budget_cursor: ListCursor::default(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        };
        app.rederive();
        app
    }

    pub(crate) fn load(db: &Database) -> Result<Self> {
        let transactions = db.load_transactions()?;
        let budgets = db.load_budgets()?;
        log::info!(
            "loaded {} transactions and {} budgets",
            transactions.len(),
            budgets.len()
        );
        Ok(Self::new(transactions, budgets, Local::now().date_naive()))
    }

    /// Recompute the view and keep cursors inside the new lists.
    pub(crate) fn rederive(&mut self) {
        self.view = engine::derive_view(
            &self.transactions,
            &self.budgets,
            self.range,
            self.reference_date,
        );
        self.transaction_cursor.clamp(self.view.filtered.len());
        self.budget_cursor.clamp(self.view.breakdown.len());
    }

    /// Persist a new transaction list, then adopt it.
    pub(crate) fn replace_transactions(
        &mut self,
        db: &mut Database,
        transactions: Vec<Transaction>,
    ) -> Result<()> {
        db.save_transactions(&transactions)?;
        self.transactions = transactions;
        self.rederive();
        Ok(())
    }

    /// Persist a new budget list, then adopt it.
    pub(crate) fn replace_budgets(&mut self, db: &mut Database, budgets: Vec<Budget>) -> Result<()> {
        db.save_budgets(&budgets)?;
        self.budgets = budgets;
        self.rederive();
        Ok(())
    }

    pub(crate) fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.transaction_cursor = ListCursor::default();
        self.rederive();
    }

    pub(crate) fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
        self.transaction_cursor = ListCursor::default();
        self.rederive();
    }

    /// Move the reference date by whole months, clamping the day when needed.
    pub(crate) fn shift_month(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.reference_date.checked_add_months(months)
        } else {
            self.reference_date.checked_sub_months(months)
        };
        if let Some(date) = moved {
            self.set_reference_date(date);
        }
    }

    pub(crate) fn period_label(&self) -> String {
        self.range.label(self.reference_date)
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.view.filtered.get(self.transaction_cursor.index)
    }

    pub(crate) fn selected_budget(&self) -> Option<&Budget> {
        self.budgets.get(self.budget_cursor.index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
