mod schema;

use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;
use crate::models::{Expense, NewExpense};

/// Owns the SQLite connection. Opened once at startup and passed by
/// reference to every operation.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self, Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::info!("Database ready at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<(), Error> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    /// Validates the input, then persists it as a single INSERT. On a
    /// validation failure nothing is written. Returns the generated id;
    /// AUTOINCREMENT keeps ids monotonic and never reused.
    pub(crate) fn insert_expense(&self, new: &NewExpense) -> Result<i64, Error> {
        if let Err(e) = new.validate() {
            tracing::warn!("Expense rejected: {e}");
            return Err(e);
        }

        let created_at = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO expenses (title, amount, category, memo, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.title,
                new.amount.to_string(),
                new.category,
                new.memo,
                created_at,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(
            "Expense added: #{id} '{}' {} ({})",
            new.title,
            new.amount,
            new.category
        );
        Ok(id)
    }

    /// Full scan, most recent first. Id breaks ties between equal
    /// timestamps so the order stays deterministic.
    pub(crate) fn all_expenses(&self) -> Result<Vec<Expense>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, category, memo, created_at
             FROM expenses ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(2)?;
            // amount is stored as TEXT; a non-decimal value is corruption
            let amount = Decimal::from_str(&amount_str).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    2,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Expense {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                amount,
                category: row.get(3)?,
                memo: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn expense_count(&self) -> Result<i64, Error> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    // ── Export ────────────────────────────────────────────────

    /// Writes every record to a CSV file and returns the row count.
    pub(crate) fn export_to_csv(&self, path: &Path) -> anyhow::Result<usize> {
        let expenses = self.all_expenses()?;

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["id", "title", "amount", "category", "memo", "created_at"])?;
        for expense in &expenses {
            writer.write_record([
                expense.id.unwrap_or_default().to_string(),
                expense.title.clone(),
                expense.amount.to_string(),
                expense.category.clone(),
                expense.memo.clone(),
                expense.created_at.clone(),
            ])?;
        }
        writer.flush()?;

        tracing::info!("Exported {} expenses to {}", expenses.len(), path.display());
        Ok(expenses.len())
    }
}

#[cfg(test)]
mod tests;
