//! Wallet operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, require_text, Database};
use crate::error::{Error, Result};
use crate::models::Wallet;

const WALLET_COLUMNS: &str = "id, user_id, name, balance, created_at";

fn wallet_from_row(row: &Row) -> rusqlite::Result<Wallet> {
    let created_at_str: String = row.get(4)?;
    Ok(Wallet {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        balance: row.get(3)?,
        created_at: parse_datetime(4, &created_at_str)?,
    })
}

impl Database {
    /// Create a wallet with an opening balance
    pub fn create_wallet(&self, user_id: i64, name: &str, opening_balance: f64) -> Result<Wallet> {
        let name = require_text("wallet name", name)?;
        if !opening_balance.is_finite() {
            return Err(Error::InvalidData(format!(
                "Opening balance must be a finite number, got {}",
                opening_balance
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO wallets (user_id, name, balance) VALUES (?, ?, ?)",
            params![user_id, name, opening_balance],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_wallet(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("wallet {}", id)))
    }

    /// List a user's wallets, oldest first
    pub fn list_wallets(&self, user_id: i64) -> Result<Vec<Wallet>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM wallets WHERE user_id = ? ORDER BY id",
            WALLET_COLUMNS
        ))?;

        let wallets = stmt
            .query_map(params![user_id], wallet_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(wallets)
    }

    /// Get a wallet owned by `user_id`
    pub fn get_wallet(&self, user_id: i64, id: i64) -> Result<Option<Wallet>> {
        let conn = self.conn()?;
        let wallet = conn
            .query_row(
                &format!(
                    "SELECT {} FROM wallets WHERE id = ? AND user_id = ?",
                    WALLET_COLUMNS
                ),
                params![id, user_id],
                wallet_from_row,
            )
            .optional()?;

        Ok(wallet)
    }
}
