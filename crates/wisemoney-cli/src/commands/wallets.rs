//! Wallet command implementations

use anyhow::Result;
use wisemoney_core::db::Database;
use wisemoney_core::models::User;

use super::{money, truncate};

pub fn cmd_wallets_list(db: &Database, user: &User) -> Result<()> {
    let wallets = db.list_wallets(user.id)?;

    if wallets.is_empty() {
        println!("No wallets yet. Create one with:");
        println!("  wisemoney wallets add \"Main Wallet\" --balance 1000");
        return Ok(());
    }

    println!();
    println!("👛 Wallets");
    println!("   ─────────────────────────────────────────────");

    for wallet in &wallets {
        println!(
            "   #{:<4} │ {:25} │ {:>12}",
            wallet.id,
            truncate(&wallet.name, 25),
            money(wallet.balance)
        );
    }

    let total: f64 = wallets.iter().map(|w| w.balance).sum();
    println!("   ─────────────────────────────────────────────");
    println!("   {:>47}", money(total));

    Ok(())
}

pub fn cmd_wallets_add(db: &Database, user: &User, name: &str, balance: f64) -> Result<()> {
    let wallet = db.create_wallet(user.id, name, balance)?;
    println!(
        "✅ Created wallet #{} \"{}\" with {}",
        wallet.id,
        wallet.name,
        money(wallet.balance)
    );
    Ok(())
}
