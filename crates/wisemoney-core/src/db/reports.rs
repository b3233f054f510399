//! Reports, export rows and demo data

use std::collections::BTreeMap;

use chrono::Duration;
use rusqlite::params;
use tracing::info;

use super::{parse_date_column, Database};
use crate::clock::Clock;
use crate::error::Result;
use crate::models::{
    CategoryTotal, ExportRow, MonthlyTrend, NewExpense, NewIncome, SeedStats, Summary,
    TransactionKind,
};

/// Days of history written by [`Database::seed_demo_data`]
pub const SEED_DAYS: i64 = 60;

const SEED_SOURCES: [&str; 4] = ["Salary", "Freelance", "Dividend", "Gift"];
const SEED_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Rent",
    "Entertainment",
    "Utilities",
    "Shopping",
];

impl Database {
    /// Totals across all of a user's records
    pub fn get_summary(&self, user_id: i64) -> Result<Summary> {
        let conn = self.conn()?;

        let total_income: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM incomes WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        let total_expense: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        let total_wallet_balance: f64 = conn.query_row(
            "SELECT COALESCE(SUM(balance), 0) FROM wallets WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;

        // Wallet balances already include attached rows
        let unattached: f64 = conn.query_row(
            r#"
            SELECT
                (SELECT COALESCE(SUM(amount), 0) FROM incomes
                 WHERE user_id = ?1 AND wallet_id IS NULL)
              - (SELECT COALESCE(SUM(amount), 0) FROM expenses
                 WHERE user_id = ?1 AND wallet_id IS NULL)
            "#,
            params![user_id],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) as total, COUNT(*) as tx_count
            FROM expenses
            WHERE user_id = ?
            GROUP BY category
            ORDER BY total DESC, category
            "#,
        )?;
        let expense_by_category = stmt
            .query_map(params![user_id], |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    amount: row.get(1)?,
                    transaction_count: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Summary {
            total_income,
            total_expense,
            total_wallet_balance,
            net_balance: total_wallet_balance + unattached,
            expense_by_category,
        })
    }

    /// Income and expense per calendar month, oldest first
    ///
    /// `months` keeps only the most recent months that have activity.
    pub fn get_monthly_trend(&self, user_id: i64, months: Option<u32>) -> Result<Vec<MonthlyTrend>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT strftime('%Y-%m', date) as period, 'income' as kind, SUM(amount)
            FROM incomes WHERE user_id = ?1 GROUP BY period
            UNION ALL
            SELECT strftime('%Y-%m', date) as period, 'expense' as kind, SUM(amount)
            FROM expenses WHERE user_id = ?1 GROUP BY period
            "#,
        )?;

        let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;
        for row in rows {
            let (month, kind, total) = row?;
            let entry = by_month.entry(month).or_default();
            if kind == "income" {
                entry.0 += total;
            } else {
                entry.1 += total;
            }
        }

        let skip = match months {
            Some(n) => by_month.len().saturating_sub(n as usize),
            None => 0,
        };

        Ok(by_month
            .into_iter()
            .skip(skip)
            .map(|(month, (income, expense))| MonthlyTrend {
                month,
                income,
                expense,
            })
            .collect())
    }

    /// Every income and expense as flat rows, ordered by date then kind
    pub fn export_rows(&self, user_id: i64) -> Result<Vec<ExportRow>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT 'Income' as kind, date, amount, source as description, wallet_id, id
            FROM incomes WHERE user_id = ?1
            UNION ALL
            SELECT 'Expense' as kind, date, amount, category as description, wallet_id, id
            FROM expenses WHERE user_id = ?1
            ORDER BY date, kind, id
            "#,
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                let kind_str: String = row.get(0)?;
                let date_str: String = row.get(1)?;
                Ok(ExportRow {
                    kind: if kind_str == "Income" {
                        TransactionKind::Income
                    } else {
                        TransactionKind::Expense
                    },
                    date: parse_date_column(1, &date_str)?,
                    amount: row.get(2)?,
                    description: row.get(3)?,
                    wallet_id: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Fill a user's account with 60 days of demo activity
    ///
    /// Reuses the user's first wallet or creates "Main Wallet" with 5000.
    /// Roughly seven days in ten get an expense; every fifteenth day
    /// (counting back from today) gets an income. Amounts are derived from
    /// the day offset so repeated runs produce the same rows.
    pub fn seed_demo_data(&self, user_id: i64, clock: &dyn Clock) -> Result<SeedStats> {
        let wallet = match self.list_wallets(user_id)?.into_iter().next() {
            Some(w) => w,
            None => self.create_wallet(user_id, "Main Wallet", 5000.0)?,
        };

        let today = clock.today();
        let mut stats = SeedStats {
            wallet_id: wallet.id,
            ..Default::default()
        };

        for i in 0..SEED_DAYS {
            let date = today - Duration::days(i);

            if i % 10 < 7 {
                let cents = (i * 37 % 100) as f64 / 100.0;
                self.add_expense(
                    user_id,
                    &NewExpense {
                        amount: 10.0 + (i * 53 % 140) as f64 + cents,
                        category: SEED_CATEGORIES[(i % 6) as usize].to_string(),
                        date: Some(date),
                        wallet_id: Some(wallet.id),
                    },
                    clock,
                )?;
                stats.expenses += 1;
            }

            if i % 15 == 0 {
                self.add_income(
                    user_id,
                    &NewIncome {
                        amount: 2000.0 + (i * 71 % 1000) as f64,
                        source: SEED_SOURCES[(i / 15 % 4) as usize].to_string(),
                        date: Some(date),
                        wallet_id: Some(wallet.id),
                    },
                    clock,
                )?;
                stats.incomes += 1;
            }
        }

        stats.final_balance = self
            .get_wallet(user_id, wallet.id)?
            .map(|w| w.balance)
            .unwrap_or(wallet.balance);

        info!(
            user_id,
            incomes = stats.incomes,
            expenses = stats.expenses,
            "Seeded demo data"
        );

        Ok(stats)
    }
}
