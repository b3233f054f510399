//! WiseMoney Core Library
//!
//! Shared functionality for the WiseMoney personal finance tracker:
//! - Rule-based parsing of free-text transaction entries
//! - Linear-trend spending forecasts
//! - Database access and migrations (users, wallets, incomes, expenses)
//! - Summary and trend reports, CSV/JSON export
//! - TOML configuration

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod forecast;
pub mod models;
pub mod nlp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use export::ExportFormat;
pub use forecast::{ForecastPoints, LinearTrend, SpendingForecaster};
pub use nlp::TransactionParser;
