//! Income and expense operations
//!
//! Inserts that name a wallet move its balance in the same SQLite
//! transaction: income adds, expense subtracts.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{parse_date_column, require_text, validate_amount, Database};
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::models::{
    Expense, ExpenseRecord, Income, NewExpense, NewIncome, RecordedTransaction, TransactionKind,
    TransactionProposal,
};

fn income_from_row(row: &Row) -> rusqlite::Result<Income> {
    let date_str: String = row.get(5)?;
    Ok(Income {
        id: row.get(0)?,
        user_id: row.get(1)?,
        wallet_id: row.get(2)?,
        source: row.get(3)?,
        amount: row.get(4)?,
        date: parse_date_column(5, &date_str)?,
    })
}

fn expense_from_row(row: &Row) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(5)?;
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        wallet_id: row.get(2)?,
        category: row.get(3)?,
        amount: row.get(4)?,
        date: parse_date_column(5, &date_str)?,
    })
}

impl Database {
    /// Record an income; `date: None` means today per `clock`
    pub fn add_income(&self, user_id: i64, income: &NewIncome, clock: &dyn Clock) -> Result<Income> {
        validate_amount(income.amount)?;
        let source = require_text("source", &income.source)?;
        let date = income.date.unwrap_or_else(|| clock.today());

        let id = self.insert_with_balance(
            "INSERT INTO incomes (user_id, wallet_id, source, amount, date) VALUES (?, ?, ?, ?, ?)",
            user_id,
            income.wallet_id,
            source,
            income.amount,
            date,
            income.amount,
        )?;

        debug!(id, user_id, amount = income.amount, "Recorded income");

        Ok(Income {
            id,
            user_id,
            wallet_id: income.wallet_id,
            source: source.to_string(),
            amount: income.amount,
            date,
        })
    }

    /// Record an expense; `date: None` means today per `clock`
    pub fn add_expense(
        &self,
        user_id: i64,
        expense: &NewExpense,
        clock: &dyn Clock,
    ) -> Result<Expense> {
        validate_amount(expense.amount)?;
        let category = require_text("category", &expense.category)?;
        let date = expense.date.unwrap_or_else(|| clock.today());

        let id = self.insert_with_balance(
            "INSERT INTO expenses (user_id, wallet_id, category, amount, date) VALUES (?, ?, ?, ?, ?)",
            user_id,
            expense.wallet_id,
            category,
            expense.amount,
            date,
            -expense.amount,
        )?;

        debug!(id, user_id, amount = expense.amount, "Recorded expense");

        Ok(Expense {
            id,
            user_id,
            wallet_id: expense.wallet_id,
            category: category.to_string(),
            amount: expense.amount,
            date,
        })
    }

    /// Persist an accepted parser proposal, dated today per `clock`
    ///
    /// The proposal's category becomes the income source or expense category.
    pub fn add_proposal(
        &self,
        user_id: i64,
        proposal: &TransactionProposal,
        wallet_id: Option<i64>,
        clock: &dyn Clock,
    ) -> Result<RecordedTransaction> {
        let recorded = match proposal.kind {
            TransactionKind::Income => RecordedTransaction::Income(self.add_income(
                user_id,
                &NewIncome {
                    amount: proposal.amount,
                    source: proposal.category.clone(),
                    date: None,
                    wallet_id,
                },
                clock,
            )?),
            TransactionKind::Expense => RecordedTransaction::Expense(self.add_expense(
                user_id,
                &NewExpense {
                    amount: proposal.amount,
                    category: proposal.category.clone(),
                    date: None,
                    wallet_id,
                },
                clock,
            )?),
        };

        Ok(recorded)
    }

    /// List a user's incomes, newest first
    pub fn list_incomes(&self, user_id: i64) -> Result<Vec<Income>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, wallet_id, source, amount, date FROM incomes WHERE user_id = ? ORDER BY date DESC, id DESC",
        )?;

        let incomes = stmt
            .query_map(params![user_id], income_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(incomes)
    }

    /// List a user's expenses, newest first
    pub fn list_expenses(&self, user_id: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, wallet_id, category, amount, date FROM expenses WHERE user_id = ? ORDER BY date DESC, id DESC",
        )?;

        let expenses = stmt
            .query_map(params![user_id], expense_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// All of a user's expenses as forecaster input, oldest first
    pub fn expense_history(&self, user_id: i64) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, amount FROM expenses WHERE user_id = ? ORDER BY date, id",
        )?;

        let records = stmt
            .query_map(params![user_id], |row| {
                let date_str: String = row.get(0)?;
                Ok(ExpenseRecord::new(
                    parse_date_column(0, &date_str)?,
                    row.get(1)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Insert one income/expense row and apply `balance_delta` to its wallet
    #[allow(clippy::too_many_arguments)]
    fn insert_with_balance(
        &self,
        insert_sql: &str,
        user_id: i64,
        wallet_id: Option<i64>,
        label: &str,
        amount: f64,
        date: NaiveDate,
        balance_delta: f64,
    ) -> Result<i64> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if let Some(wallet_id) = wallet_id {
            let owned: Option<i64> = tx
                .query_row(
                    "SELECT id FROM wallets WHERE id = ? AND user_id = ?",
                    params![wallet_id, user_id],
                    |row| row.get(0),
                )
                .optional()?;
            if owned.is_none() {
                return Err(Error::NotFound(format!("wallet {}", wallet_id)));
            }
        }

        tx.execute(
            insert_sql,
            params![user_id, wallet_id, label, amount, date.to_string()],
        )?;
        let id = tx.last_insert_rowid();

        if let Some(wallet_id) = wallet_id {
            tx.execute(
                "UPDATE wallets SET balance = balance + ? WHERE id = ?",
                params![balance_delta, wallet_id],
            )?;
        }

        tx.commit()?;
        Ok(id)
    }
}
