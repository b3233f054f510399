//! Free-text transaction commands

use anyhow::{bail, Context, Result};
use wisemoney_core::clock::Clock;
use wisemoney_core::db::Database;
use wisemoney_core::models::{RecordedTransaction, TransactionProposal, User};
use wisemoney_core::TransactionParser;

use super::money;

fn print_proposal(proposal: &TransactionProposal) {
    println!();
    println!("🧠 Parsed transaction");
    println!("   Type:       {}", proposal.kind);
    println!("   Amount:     {}", money(proposal.amount));
    println!("   Category:   {}", proposal.category);
    println!("   Confidence: {:.0}%", proposal.confidence * 100.0);
}

pub fn cmd_parse(text: &str) -> Result<()> {
    match TransactionParser::new().parse(text) {
        Some(proposal) => print_proposal(&proposal),
        None => {
            println!("Could not find an amount in \"{}\".", text);
            println!("Try something like: wisemoney parse \"Spent 500 on Pizza\"");
        }
    }
    Ok(())
}

/// Parse text and record it against a wallet (first wallet by default)
pub fn cmd_parse_and_save(
    db: &Database,
    user: &User,
    text: &str,
    wallet_id: Option<i64>,
    clock: &dyn Clock,
) -> Result<RecordedTransaction> {
    let Some(proposal) = TransactionParser::new().parse(text) else {
        bail!("Could not find an amount in \"{}\"", text);
    };
    print_proposal(&proposal);

    let wallet_id = match wallet_id {
        Some(id) => id,
        None => db
            .list_wallets(user.id)?
            .first()
            .map(|w| w.id)
            .context("No wallet found. Create one with: wisemoney wallets add <name>")?,
    };

    let recorded = db.add_proposal(user.id, &proposal, Some(wallet_id), clock)?;
    println!(
        "✅ Saved {} of {} to wallet #{}",
        recorded.kind().as_str().to_lowercase(),
        money(recorded.amount()),
        wallet_id
    );

    Ok(recorded)
}
