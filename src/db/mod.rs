mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// Load/save boundary for the two lists. Nothing derived is ever stored.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_budgets()?;
        log::info!("opened database at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_budgets()?;
        Ok(db)
    }

    /// Create any missing tables and stamp the schema version. A database
    /// written by a newer build is refused rather than guessed at.
    fn migrate(&mut self) -> Result<()> {
        self.conn.execute_batch(schema::SCHEMA_V1)?;

        let stored: Option<i32> = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match stored {
            None => {
                self.conn.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )?;
            }
            Some(v) if v > schema::CURRENT_VERSION => {
                anyhow::bail!(
                    "Database schema v{v} is newer than this build supports (v{})",
                    schema::CURRENT_VERSION
                );
            }
            Some(_) => {}
        }
        Ok(())
    }

    fn seed_default_budgets(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM budgets", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        log::info!("seeding {} default budgets", DEFAULT_BUDGETS.len());
        self.save_budgets(&Budget::defaults())
    }

    // ── Transactions ──────────────────────────────────────────

    /// All transactions in the order they were added.
    pub(crate) fn load_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, description, amount, category FROM transactions ORDER BY seq",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(3)?;
            Ok(Transaction {
                id: row.get(0)?,
                date: row.get(1)?,
                description: row.get(2)?,
                amount: parse_stored_amount(&amount_str),
                category: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Replace the stored list with `txns`, keeping their order.
    pub(crate) fn save_transactions(&mut self, txns: &[Transaction]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM transactions", [])?;
        for txn in txns {
            tx.execute(
                "INSERT INTO transactions (id, date, description, amount, category)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    txn.id,
                    txn.date,
                    txn.description,
                    txn.amount.to_string(),
                    txn.category,
                ],
            )?;
        }
        tx.commit().context("Failed to save transactions")?;
        log::debug!("saved {} transactions", txns.len());
        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn load_budgets(&self) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, limit_amount FROM budgets ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            let amt_str: String = row.get(1)?;
            Ok(Budget {
                category: row.get(0)?,
                limit: parse_stored_amount(&amt_str),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn save_budgets(&mut self, budgets: &[Budget]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM budgets", [])?;
        for (position, budget) in budgets.iter().enumerate() {
            tx.execute(
                "INSERT INTO budgets (position, category, limit_amount) VALUES (?1, ?2, ?3)",
                params![position as i64, budget.category, budget.limit.to_string()],
            )?;
        }
        tx.commit().context("Failed to save budgets")?;
        log::debug!("saved {} budgets", budgets.len());
        Ok(())
    }
}

fn parse_stored_amount(s: &str) -> Decimal {
    Decimal::from_str(s)
        .ok()
        .filter(|d| d.abs() <= crate::ledger::MAX_AMOUNT)
        .unwrap_or_else(|| {
            log::warn!("unreadable stored amount '{s}', using 0");
            Decimal::ZERO
        })
}
