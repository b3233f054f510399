//! WiseMoney CLI - Personal finance tracker
//!
//! Usage:
//!   wisemoney init                         Initialize database
//!   wisemoney parse "Spent 500 on Pizza"   Parse (and optionally --save) a transaction
//!   wisemoney report forecast --days 30    Forecast daily spending
//!   wisemoney serve --port 8000            Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wisemoney_core::clock::SystemClock;
use wisemoney_core::config::Config;
use wisemoney_core::SpendingForecaster;

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let clock = SystemClock;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt, &config).await
        }
        Commands::Seed => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let user = commands::current_user(&db, &cli.user)?;
            commands::cmd_seed(&db, &user, &clock)
        }
        Commands::Wallets { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let user = commands::current_user(&db, &cli.user)?;
            match action {
                None | Some(WalletsAction::List) => commands::cmd_wallets_list(&db, &user),
                Some(WalletsAction::Add { name, balance }) => {
                    commands::cmd_wallets_add(&db, &user, &name, balance)
                }
            }
        }
        Commands::Income { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let user = commands::current_user(&db, &cli.user)?;
            match action {
                IncomeAction::Add {
                    amount,
                    source,
                    date,
                    wallet,
                } => commands::cmd_income_add(
                    &db,
                    &user,
                    amount,
                    &source,
                    date.as_deref(),
                    wallet,
                    &clock,
                ),
                IncomeAction::List => commands::cmd_income_list(&db, &user),
            }
        }
        Commands::Expense { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let user = commands::current_user(&db, &cli.user)?;
            match action {
                ExpenseAction::Add {
                    amount,
                    category,
                    date,
                    wallet,
                } => commands::cmd_expense_add(
                    &db,
                    &user,
                    amount,
                    &category,
                    date.as_deref(),
                    wallet,
                    &clock,
                ),
                ExpenseAction::List => commands::cmd_expense_list(&db, &user),
            }
        }
        Commands::Parse { text, save, wallet } => {
            if save {
                let db = commands::open_db(&cli.db, cli.no_encrypt)?;
                let user = commands::current_user(&db, &cli.user)?;
                commands::cmd_parse_and_save(&db, &user, &text, wallet, &clock).map(|_| ())
            } else {
                commands::cmd_parse(&text)
            }
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let user = commands::current_user(&db, &cli.user)?;
            match report_type {
                ReportType::Summary => commands::cmd_report_summary(&db, &user),
                ReportType::Trend { months } => commands::cmd_report_trend(
                    &db,
                    &user,
                    months.unwrap_or(config.reports.trend_months),
                ),
                ReportType::Forecast { days } => commands::cmd_report_forecast(
                    &db,
                    &user,
                    &SpendingForecaster::new(),
                    days.unwrap_or(config.forecast.default_days),
                    config.forecast.max_days,
                ),
                ReportType::Export { format, output } => {
                    commands::cmd_report_export(&db, &user, &format, output.as_deref())
                }
            }
        }
    }
}
