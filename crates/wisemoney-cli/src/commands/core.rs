//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `current_user` - Resolve `--user` to a stored user
//! - `cmd_init` - Initialize the database
//! - `cmd_seed` - Load demo data

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use wisemoney_core::clock::Clock;
use wisemoney_core::db::Database;
use wisemoney_core::models::User;

use super::money;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Get or create the user commands act as
pub fn current_user(db: &Database, email: &str) -> Result<User> {
    db.ensure_user(email, None)
        .with_context(|| format!("Failed to resolve user {}", email))
}

/// Parse a `--date` argument
pub fn parse_date_arg(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", value))
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Create a wallet: wisemoney wallets add \"Main Wallet\" --balance 1000");
    println!("  2. Add a transaction: wisemoney parse \"Spent 500 on Pizza\" --save");
    println!("  3. Start web API: wisemoney serve");

    Ok(())
}

pub fn cmd_seed(db: &Database, user: &User, clock: &dyn Clock) -> Result<()> {
    println!("🌱 Seeding demo data for {}...", user.email);

    let stats = db
        .seed_demo_data(user.id, clock)
        .context("Failed to seed demo data")?;

    println!("   Wallet #{}", stats.wallet_id);
    println!("   Incomes added: {}", stats.incomes);
    println!("   Expenses added: {}", stats.expenses);
    println!("   Wallet balance: {}", money(stats.final_balance));
    println!("✅ Demo data seeded!");

    Ok(())
}
