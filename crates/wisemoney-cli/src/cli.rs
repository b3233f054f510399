//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// WiseMoney - Track income and expenses, forecast spending
#[derive(Parser)]
#[command(name = "wisemoney")]
#[command(about = "Personal finance tracker with text entry and spending forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "wisemoney.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set WISEMONEY_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// User (email) that commands act as
    #[arg(long, default_value = "local-dev", global = true)]
    pub user: String,

    /// Config file (defaults to <data dir>/wisemoney/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on (default from config: 8000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default from config: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires Cloudflare Access headers or an API key.
        #[arg(long)]
        no_auth: bool,
    },

    /// Fill the database with 60 days of demo activity
    Seed,

    /// Manage wallets
    Wallets {
        #[command(subcommand)]
        action: Option<WalletsAction>,
    },

    /// Record or list incomes
    Income {
        #[command(subcommand)]
        action: IncomeAction,
    },

    /// Record or list expenses
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },

    /// Parse a sentence like "Spent 500 on Pizza" into a transaction
    Parse {
        /// Text to parse
        text: String,

        /// Record the parsed transaction
        #[arg(long)]
        save: bool,

        /// Wallet to record against (defaults to the first wallet)
        #[arg(long)]
        wallet: Option<i64>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },
}

#[derive(Subcommand)]
pub enum WalletsAction {
    /// List wallets
    List,

    /// Create a wallet
    Add {
        /// Wallet name
        name: String,

        /// Opening balance
        #[arg(long, default_value = "0")]
        balance: f64,
    },
}

#[derive(Subcommand)]
pub enum IncomeAction {
    /// Record an income
    Add {
        /// Amount received
        amount: f64,

        /// Where it came from (e.g. Salary)
        source: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Wallet to credit
        #[arg(long)]
        wallet: Option<i64>,
    },

    /// List incomes, newest first
    List,
}

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Record an expense
    Add {
        /// Amount spent
        amount: f64,

        /// Spending category (e.g. Food)
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Wallet to debit
        #[arg(long)]
        wallet: Option<i64>,
    },

    /// List expenses, newest first
    List,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and balance totals with spending by category
    Summary,

    /// Income and expense per month
    Trend {
        /// Most recent months to show (default from config: 12)
        #[arg(long)]
        months: Option<u32>,
    },

    /// Predict daily spending from the expense history
    Forecast {
        /// Days to predict (default from config: 30)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Export all incomes and expenses
    Export {
        /// Output format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
