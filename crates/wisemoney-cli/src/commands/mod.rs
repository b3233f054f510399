//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, seed) and shared utilities (open_db, current_user)
//! - `parse` - Free-text transaction parsing
//! - `reports` - Summary, trend, forecast and export
//! - `serve` - Web server command
//! - `transactions` - Income and expense commands
//! - `wallets` - Wallet commands

pub mod core;
pub mod parse;
pub mod reports;
pub mod serve;
pub mod transactions;
pub mod wallets;

// Re-export command functions for main.rs
pub use core::*;
pub use parse::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;
pub use wallets::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a money amount for terminal output
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}
