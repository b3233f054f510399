//! CLI command tests

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use wisemoney_core::clock::FixedClock;
use wisemoney_core::db::Database;
use wisemoney_core::models::{RecordedTransaction, User};
use wisemoney_core::SpendingForecaster;

use crate::cli::{Cli, Commands, ReportType};
use crate::commands::{self, money, truncate};

fn clock() -> FixedClock {
    FixedClock::on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
}

fn setup_test_db() -> (Database, User) {
    let db = Database::in_memory().unwrap();
    let user = commands::current_user(&db, "local-dev").unwrap();
    (db, user)
}

// ========== Helpers ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer name", 10), "a much ...");
    assert_eq!(truncate("ééééééé", 5), "éé...");
}

#[test]
fn test_money() {
    assert_eq!(money(12.5), "$12.50");
    assert_eq!(money(-3.0), "-$3.00");
}

#[test]
fn test_parse_date_arg() {
    assert_eq!(
        commands::parse_date_arg("2024-02-29").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
    assert!(commands::parse_date_arg("29/02/2024").is_err());
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    commands::cmd_init(&path, true).unwrap();
    assert!(path.exists());

    let db = commands::open_db(&path, true).unwrap();
    assert!(db.list_wallets(1).unwrap().is_empty());
}

// ========== Argument Parsing ==========

#[test]
fn test_cli_global_defaults() {
    let cli = Cli::try_parse_from(["wisemoney", "seed"]).unwrap();
    assert_eq!(cli.db.to_str(), Some("wisemoney.db"));
    assert_eq!(cli.user, "local-dev");
    assert!(!cli.no_encrypt);
    assert!(matches!(cli.command, Commands::Seed));
}

#[test]
fn test_cli_report_forecast_days() {
    let cli = Cli::try_parse_from([
        "wisemoney",
        "report",
        "forecast",
        "--days",
        "14",
        "--user",
        "alice@example.com",
    ])
    .unwrap();
    assert_eq!(cli.user, "alice@example.com");
    match cli.command {
        Commands::Report {
            report_type: ReportType::Forecast { days },
        } => assert_eq!(days, Some(14)),
        _ => panic!("expected forecast report"),
    }
}

#[test]
fn test_cli_parse_save() {
    let cli = Cli::try_parse_from([
        "wisemoney",
        "parse",
        "Spent 500 on Pizza",
        "--save",
        "--wallet",
        "3",
    ])
    .unwrap();
    match cli.command {
        Commands::Parse { text, save, wallet } => {
            assert_eq!(text, "Spent 500 on Pizza");
            assert!(save);
            assert_eq!(wallet, Some(3));
        }
        _ => panic!("expected parse command"),
    }
}

// ========== Wallets / Transactions ==========

#[test]
fn test_cmd_wallets_add_and_list() {
    let (db, user) = setup_test_db();

    commands::cmd_wallets_add(&db, &user, "Cash", 150.0).unwrap();
    commands::cmd_wallets_list(&db, &user).unwrap();

    let wallets = db.list_wallets(user.id).unwrap();
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].balance, 150.0);
}

#[test]
fn test_cmd_wallets_add_empty_name_fails() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_wallets_add(&db, &user, "  ", 0.0).is_err());
}

#[test]
fn test_cmd_income_and_expense_add() {
    let (db, user) = setup_test_db();
    let wallet = db.create_wallet(user.id, "Main", 100.0).unwrap();

    commands::cmd_income_add(
        &db,
        &user,
        50.0,
        "Gift",
        Some("2024-03-01"),
        Some(wallet.id),
        &clock(),
    )
    .unwrap();
    commands::cmd_expense_add(&db, &user, 30.0, "Food", None, Some(wallet.id), &clock())
        .unwrap();

    let incomes = db.list_incomes(user.id).unwrap();
    assert_eq!(incomes[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

    let expenses = db.list_expenses(user.id).unwrap();
    assert_eq!(expenses[0].date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.balance, 120.0);

    commands::cmd_income_list(&db, &user).unwrap();
    commands::cmd_expense_list(&db, &user).unwrap();
}

#[test]
fn test_cmd_expense_add_bad_date() {
    let (db, user) = setup_test_db();
    let result =
        commands::cmd_expense_add(&db, &user, 30.0, "Food", Some("tomorrow"), None, &clock());
    assert!(result.is_err());
    assert!(db.list_expenses(user.id).unwrap().is_empty());
}

// ========== Parse ==========

#[test]
fn test_cmd_parse_without_amount_is_ok() {
    assert!(commands::cmd_parse("spent a lot on pizza").is_ok());
    assert!(commands::cmd_parse("Spent 500 on Pizza").is_ok());
}

#[test]
fn test_cmd_parse_and_save_uses_first_wallet() {
    let (db, user) = setup_test_db();
    let wallet = db.create_wallet(user.id, "Main", 1000.0).unwrap();

    let recorded =
        commands::cmd_parse_and_save(&db, &user, "Spent 500 on Pizza", None, &clock()).unwrap();

    match recorded {
        RecordedTransaction::Expense(e) => {
            assert_eq!(e.category, "Pizza");
            assert_eq!(e.amount, 500.0);
            assert_eq!(e.wallet_id, Some(wallet.id));
        }
        other => panic!("expected expense, got {:?}", other),
    }

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.balance, 500.0);
}

#[test]
fn test_cmd_parse_and_save_requires_wallet() {
    let (db, user) = setup_test_db();
    let result = commands::cmd_parse_and_save(&db, &user, "Spent 5 on tea", None, &clock());
    assert!(result.is_err());
}

#[test]
fn test_cmd_parse_and_save_requires_amount() {
    let (db, user) = setup_test_db();
    db.create_wallet(user.id, "Main", 0.0).unwrap();
    let result = commands::cmd_parse_and_save(&db, &user, "Spent some on tea", None, &clock());
    assert!(result.is_err());
    assert!(db.list_expenses(user.id).unwrap().is_empty());
}

// ========== Seed / Reports ==========

#[test]
fn test_cmd_seed() {
    let (db, user) = setup_test_db();
    commands::cmd_seed(&db, &user, &clock()).unwrap();

    assert_eq!(db.list_expenses(user.id).unwrap().len(), 42);
    assert_eq!(db.list_incomes(user.id).unwrap().len(), 4);
}

#[test]
fn test_cmd_reports_run() {
    let (db, user) = setup_test_db();
    commands::cmd_seed(&db, &user, &clock()).unwrap();

    let forecaster = SpendingForecaster::with_clock(Arc::new(clock()));

    commands::cmd_report_summary(&db, &user).unwrap();
    commands::cmd_report_trend(&db, &user, 12).unwrap();
    commands::cmd_report_forecast(&db, &user, &forecaster, 30, 365).unwrap();
}

#[test]
fn test_cmd_reports_on_empty_db() {
    let (db, user) = setup_test_db();
    let forecaster = SpendingForecaster::with_clock(Arc::new(clock()));

    commands::cmd_report_summary(&db, &user).unwrap();
    commands::cmd_report_trend(&db, &user, 12).unwrap();
    commands::cmd_report_forecast(&db, &user, &forecaster, 30, 365).unwrap();
}

#[test]
fn test_cmd_report_forecast_rejects_bad_days() {
    let (db, user) = setup_test_db();
    let forecaster = SpendingForecaster::with_clock(Arc::new(clock()));

    assert!(commands::cmd_report_forecast(&db, &user, &forecaster, 0, 365).is_err());
    assert!(commands::cmd_report_forecast(&db, &user, &forecaster, 400, 365).is_err());
}

#[test]
fn test_cmd_report_trend_rejects_zero_months() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_report_trend(&db, &user, 0).is_err());
}

#[test]
fn test_cmd_report_export_to_file() {
    let (db, user) = setup_test_db();
    commands::cmd_seed(&db, &user, &clock()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("export.csv");
    commands::cmd_report_export(&db, &user, "csv", Some(&csv_path)).unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("type,date,amount,description,wallet_id"));
    assert_eq!(lines.count(), 46);

    let json_path = dir.path().join("export.json");
    commands::cmd_report_export(&db, &user, "json", Some(&json_path)).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 46);
}

#[test]
fn test_cmd_report_export_unknown_format() {
    let (db, user) = setup_test_db();
    assert!(commands::cmd_report_export(&db, &user, "xml", None).is_err());
}
