//! User operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, require_text, Database};
use crate::error::{Error, Result};
use crate::models::User;

impl Database {
    /// Get or create the user for an email
    ///
    /// An existing user keeps their stored name.
    pub fn ensure_user(&self, email: &str, name: Option<&str>) -> Result<User> {
        let email = require_text("email", email)?;

        if let Some(user) = self.get_user_by_email(email)? {
            return Ok(user);
        }

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO users (email, name) VALUES (?, ?)",
            params![email, name],
        )?;
        if inserted > 0 {
            info!(email = %email, "Provisioned user");
        }

        // A concurrent request may have won the insert
        self.get_user_by_email(email)?
            .ok_or_else(|| Error::NotFound(format!("user {}", email)))
    }

    /// Look up a user by email
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, email, name, created_at FROM users WHERE email = ?",
                params![email],
                |row| {
                    let created_at_str: String = row.get(3)?;
                    Ok(User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                        created_at: parse_datetime(3, &created_at_str)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }
}
