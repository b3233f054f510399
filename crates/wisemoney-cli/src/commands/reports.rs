//! Report command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use wisemoney_core::db::Database;
use wisemoney_core::models::User;
use wisemoney_core::{ExportFormat, SpendingForecaster};

use super::{money, truncate};

pub fn cmd_report_summary(db: &Database, user: &User) -> Result<()> {
    let summary = db.get_summary(user.id)?;

    println!();
    println!("📊 Summary");
    println!("   ─────────────────────────────────────────────");
    println!("   Total income:     {:>12}", money(summary.total_income));
    println!("   Total expense:    {:>12}", money(summary.total_expense));
    println!("   Wallet balance:   {:>12}", money(summary.total_wallet_balance));
    println!("   Net balance:      {:>12}", money(summary.net_balance));

    if summary.expense_by_category.is_empty() {
        return Ok(());
    }

    println!();
    println!("   {:25} │ {:>12} │ {:>5}", "Category", "Amount", "Count");
    println!("   ──────────────────────────┼──────────────┼──────");
    for cat in &summary.expense_by_category {
        println!(
            "   {:25} │ {:>12} │ {:>5}",
            truncate(&cat.category, 25),
            money(cat.amount),
            cat.transaction_count
        );
    }

    Ok(())
}

pub fn cmd_report_trend(db: &Database, user: &User, months: u32) -> Result<()> {
    if months == 0 {
        bail!("--months must be at least 1");
    }

    let trend = db.get_monthly_trend(user.id, Some(months))?;

    println!();
    println!("📈 Monthly Trend");
    println!("   ─────────────────────────────────────────────");

    if trend.is_empty() {
        println!("   No transactions recorded yet.");
        return Ok(());
    }

    println!("   {:7} │ {:>12} │ {:>12}", "Month", "Income", "Expense");
    for month in &trend {
        println!(
            "   {:7} │ {:>12} │ {:>12}",
            month.month,
            money(month.income),
            money(month.expense)
        );
    }

    Ok(())
}

pub fn cmd_report_forecast(
    db: &Database,
    user: &User,
    forecaster: &SpendingForecaster,
    days: u32,
    max_days: u32,
) -> Result<()> {
    if days > max_days {
        bail!("--days must be at most {}", max_days);
    }

    let history = db.expense_history(user.id)?;
    let points = forecaster
        .forecast(&history, days)
        .context("Failed to compute forecast")?;

    println!();
    println!("🔮 Spending Forecast ({} days)", days);
    println!("   ─────────────────────────────────────────────");

    let Some(trend) = points.trend().copied() else {
        println!("   No expense history yet. Record some expenses first.");
        return Ok(());
    };

    println!("   Based on {} days with spending", points.history_days());
    let direction = if trend.slope() > 0.0 {
        "rising"
    } else if trend.slope() < 0.0 {
        "falling"
    } else {
        "flat"
    };
    println!("   Trend: {} ({:+.2}/day)", direction, trend.slope());
    println!();

    let mut total = 0.0;
    for point in points {
        total += point.predicted_amount;
        println!("   {} │ {:>12}", point.date, money(point.predicted_amount));
    }
    println!("   ─────────────────────────────────────────────");
    println!("   Total predicted:  {}", money(total));

    Ok(())
}

pub fn cmd_report_export(
    db: &Database,
    user: &User,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let rows = db.export_rows(user.id)?;
    let content = format.render(&rows)?;

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "✅ Exported {} transactions to {}",
                rows.len(),
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}
