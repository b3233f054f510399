//! Database tests

use super::*;
use crate::clock::{Clock, FixedClock};
use crate::models::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> (Database, User, FixedClock) {
    let db = Database::in_memory().unwrap();
    let user = db.ensure_user("alice@example.com", Some("Alice")).unwrap();
    (db, user, FixedClock::on(date(2024, 3, 15)))
}

fn expense(amount: f64, category: &str, on: NaiveDate, wallet_id: Option<i64>) -> NewExpense {
    NewExpense {
        amount,
        category: category.to_string(),
        date: Some(on),
        wallet_id,
    }
}

fn income(amount: f64, source: &str, on: NaiveDate, wallet_id: Option<i64>) -> NewIncome {
    NewIncome {
        amount,
        source: source.to_string(),
        date: Some(on),
        wallet_id,
    }
}

#[test]
fn test_schema_tables_exist() {
    let db = Database::in_memory().unwrap();
    let conn = db.conn().unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'wallets', 'incomes', 'expenses')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn test_reopen_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wm.db");
    let path = path.to_str().unwrap();

    let db = Database::new_unencrypted(path).unwrap();
    db.ensure_user("bob@example.com", None).unwrap();
    drop(db);

    let db = Database::new_unencrypted(path).unwrap();
    assert!(db.get_user_by_email("bob@example.com").unwrap().is_some());
    assert_eq!(db.path(), path);
}

#[test]
fn test_ensure_user_is_idempotent() {
    let db = Database::in_memory().unwrap();
    let first = db.ensure_user("carol@example.com", Some("Carol")).unwrap();
    let second = db.ensure_user("carol@example.com", Some("Other")).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name.as_deref(), Some("Carol"));
}

#[test]
fn test_ensure_user_rejects_empty_email() {
    let db = Database::in_memory().unwrap();
    assert!(matches!(
        db.ensure_user("  ", None),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_unknown_user_is_none() {
    let db = Database::in_memory().unwrap();
    assert!(db.get_user_by_email("nobody@example.com").unwrap().is_none());
}

#[test]
fn test_wallet_crud() {
    let (db, user, _) = setup();

    let wallet = db.create_wallet(user.id, "Cash", 250.0).unwrap();
    assert_eq!(wallet.name, "Cash");
    assert_eq!(wallet.balance, 250.0);

    let wallets = db.list_wallets(user.id).unwrap();
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].id, wallet.id);

    assert!(db.get_wallet(user.id, wallet.id).unwrap().is_some());
}

#[test]
fn test_wallets_are_scoped_to_user() {
    let (db, alice, _) = setup();
    let bob = db.ensure_user("bob@example.com", None).unwrap();

    let wallet = db.create_wallet(alice.id, "Cash", 0.0).unwrap();

    assert!(db.list_wallets(bob.id).unwrap().is_empty());
    assert!(db.get_wallet(bob.id, wallet.id).unwrap().is_none());
}

#[test]
fn test_create_wallet_validation() {
    let (db, user, _) = setup();
    assert!(matches!(
        db.create_wallet(user.id, "", 0.0),
        Err(Error::InvalidData(_))
    ));
    assert!(matches!(
        db.create_wallet(user.id, "Cash", f64::NAN),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_income_increases_wallet_balance() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Main", 100.0).unwrap();

    let recorded = db
        .add_income(
            user.id,
            &income(50.0, "Salary", date(2024, 3, 1), Some(wallet.id)),
            &clock,
        )
        .unwrap();
    assert_eq!(recorded.source, "Salary");
    assert_eq!(recorded.wallet_id, Some(wallet.id));

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.balance, 150.0);
}

#[test]
fn test_expense_decreases_wallet_balance() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Main", 100.0).unwrap();

    db.add_expense(
        user.id,
        &expense(30.0, "Food", date(2024, 3, 1), Some(wallet.id)),
        &clock,
    )
    .unwrap();

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.balance, 70.0);
}

#[test]
fn test_transaction_without_wallet_leaves_balances_alone() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Main", 100.0).unwrap();

    db.add_expense(user.id, &expense(30.0, "Food", date(2024, 3, 1), None), &clock)
        .unwrap();

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.balance, 100.0);
    assert_eq!(db.list_expenses(user.id).unwrap().len(), 1);
}

#[test]
fn test_missing_date_uses_clock() {
    let (db, user, clock) = setup();

    let recorded = db
        .add_expense(
            user.id,
            &NewExpense {
                amount: 5.0,
                category: "Coffee".to_string(),
                ..Default::default()
            },
            &clock,
        )
        .unwrap();

    assert_eq!(recorded.date, date(2024, 3, 15));
}

#[test]
fn test_foreign_wallet_is_not_found_and_nothing_is_written() {
    let (db, alice, clock) = setup();
    let bob = db.ensure_user("bob@example.com", None).unwrap();
    let bobs_wallet = db.create_wallet(bob.id, "Bob's", 100.0).unwrap();

    let result = db.add_expense(
        alice.id,
        &expense(10.0, "Food", date(2024, 3, 1), Some(bobs_wallet.id)),
        &clock,
    );
    assert!(matches!(result, Err(Error::NotFound(_))));

    assert!(db.list_expenses(alice.id).unwrap().is_empty());
    let bobs_wallet = db.get_wallet(bob.id, bobs_wallet.id).unwrap().unwrap();
    assert_eq!(bobs_wallet.balance, 100.0);
}

#[test]
fn test_invalid_amounts_rejected() {
    let (db, user, clock) = setup();

    for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let result = db.add_income(
            user.id,
            &income(amount, "Salary", date(2024, 3, 1), None),
            &clock,
        );
        assert!(
            matches!(result, Err(Error::InvalidData(_))),
            "amount {} should be rejected",
            amount
        );
    }
}

#[test]
fn test_empty_category_rejected() {
    let (db, user, clock) = setup();
    let result = db.add_expense(user.id, &expense(5.0, "   ", date(2024, 3, 1), None), &clock);
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn test_lists_are_newest_first() {
    let (db, user, clock) = setup();
    db.add_income(user.id, &income(1.0, "A", date(2024, 1, 1), None), &clock)
        .unwrap();
    db.add_income(user.id, &income(2.0, "B", date(2024, 2, 1), None), &clock)
        .unwrap();

    let incomes = db.list_incomes(user.id).unwrap();
    assert_eq!(incomes[0].source, "B");
    assert_eq!(incomes[1].source, "A");
}

#[test]
fn test_expense_history_is_oldest_first() {
    let (db, user, clock) = setup();
    db.add_expense(user.id, &expense(20.0, "B", date(2024, 2, 1), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(10.0, "A", date(2024, 1, 1), None), &clock)
        .unwrap();

    let history = db.expense_history(user.id).unwrap();
    assert_eq!(
        history,
        vec![
            ExpenseRecord::new(date(2024, 1, 1), 10.0),
            ExpenseRecord::new(date(2024, 2, 1), 20.0),
        ]
    );
}

#[test]
fn test_add_proposal_income_and_expense() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Main", 0.0).unwrap();

    let income = db
        .add_proposal(
            user.id,
            &TransactionProposal {
                kind: TransactionKind::Income,
                amount: 500.0,
                category: "Freelance".to_string(),
                confidence: 0.8,
            },
            Some(wallet.id),
            &clock,
        )
        .unwrap();
    assert_eq!(income.kind(), TransactionKind::Income);

    let expense = db
        .add_proposal(
            user.id,
            &TransactionProposal {
                kind: TransactionKind::Expense,
                amount: 120.0,
                category: "Pizza".to_string(),
                confidence: 0.8,
            },
            Some(wallet.id),
            &clock,
        )
        .unwrap();
    assert_eq!(expense.amount(), 120.0);

    match expense {
        RecordedTransaction::Expense(e) => {
            assert_eq!(e.category, "Pizza");
            assert_eq!(e.date, date(2024, 3, 15));
        }
        other => panic!("expected expense, got {:?}", other),
    }

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.balance, 380.0);
}

#[test]
fn test_summary() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Main", 1000.0).unwrap();

    db.add_income(user.id, &income(500.0, "Salary", date(2024, 3, 1), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(40.0, "Food", date(2024, 3, 2), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(60.0, "Food", date(2024, 3, 3), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(300.0, "Rent", date(2024, 3, 4), None), &clock)
        .unwrap();

    let summary = db.get_summary(user.id).unwrap();
    assert_eq!(summary.total_income, 500.0);
    assert_eq!(summary.total_expense, 400.0);
    assert_eq!(summary.total_wallet_balance, wallet.balance);
    assert_eq!(summary.net_balance, 1000.0 + 500.0 - 400.0);

    assert_eq!(summary.expense_by_category.len(), 2);
    assert_eq!(summary.expense_by_category[0].category, "Rent");
    assert_eq!(summary.expense_by_category[1].category, "Food");
    assert_eq!(summary.expense_by_category[1].amount, 100.0);
    assert_eq!(summary.expense_by_category[1].transaction_count, 2);
}

#[test]
fn test_summary_counts_wallet_transactions_once() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Main", 1000.0).unwrap();

    db.add_expense(
        user.id,
        &expense(400.0, "Rent", date(2024, 3, 1), Some(wallet.id)),
        &clock,
    )
    .unwrap();
    db.add_income(
        user.id,
        &income(100.0, "Gift", date(2024, 3, 2), Some(wallet.id)),
        &clock,
    )
    .unwrap();

    let summary = db.get_summary(user.id).unwrap();
    assert_eq!(summary.total_wallet_balance, 700.0);
    assert_eq!(summary.total_income, 100.0);
    assert_eq!(summary.total_expense, 400.0);
    assert_eq!(summary.net_balance, summary.total_wallet_balance);

    // Unattached rows still move the net balance
    db.add_expense(user.id, &expense(50.0, "Food", date(2024, 3, 3), None), &clock)
        .unwrap();
    let summary = db.get_summary(user.id).unwrap();
    assert_eq!(summary.total_wallet_balance, 700.0);
    assert_eq!(summary.net_balance, 650.0);
}

#[test]
fn test_summary_empty_user() {
    let (db, user, _) = setup();
    let summary = db.get_summary(user.id).unwrap();
    assert_eq!(summary.total_income, 0.0);
    assert_eq!(summary.total_expense, 0.0);
    assert_eq!(summary.net_balance, 0.0);
    assert!(summary.expense_by_category.is_empty());
}

#[test]
fn test_monthly_trend() {
    let (db, user, clock) = setup();
    db.add_income(user.id, &income(100.0, "A", date(2024, 1, 10), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(30.0, "B", date(2024, 1, 20), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(20.0, "B", date(2024, 1, 21), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(5.0, "C", date(2024, 3, 1), None), &clock)
        .unwrap();

    let trend = db.get_monthly_trend(user.id, None).unwrap();
    assert_eq!(
        trend,
        vec![
            MonthlyTrend {
                month: "2024-01".to_string(),
                income: 100.0,
                expense: 50.0,
            },
            MonthlyTrend {
                month: "2024-03".to_string(),
                income: 0.0,
                expense: 5.0,
            },
        ]
    );

    let last = db.get_monthly_trend(user.id, Some(1)).unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].month, "2024-03");
}

#[test]
fn test_export_rows_ordered_by_date_then_kind() {
    let (db, user, clock) = setup();
    db.add_income(user.id, &income(100.0, "Salary", date(2024, 1, 2), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(30.0, "Food", date(2024, 1, 2), None), &clock)
        .unwrap();
    db.add_expense(user.id, &expense(10.0, "Bus", date(2024, 1, 1), None), &clock)
        .unwrap();

    let rows = db.export_rows(user.id).unwrap();
    let summary: Vec<(TransactionKind, &str)> = rows
        .iter()
        .map(|r| (r.kind, r.description.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (TransactionKind::Expense, "Bus"),
            (TransactionKind::Expense, "Food"),
            (TransactionKind::Income, "Salary"),
        ]
    );
}

#[test]
fn test_seed_demo_data() {
    let (db, user, clock) = setup();

    let stats = db.seed_demo_data(user.id, &clock).unwrap();
    assert_eq!(stats.expenses, 42);
    assert_eq!(stats.incomes, 4);

    let wallets = db.list_wallets(user.id).unwrap();
    assert_eq!(wallets.len(), 1);
    assert_eq!(wallets[0].name, "Main Wallet");

    let history = db.expense_history(user.id).unwrap();
    assert_eq!(history.len(), 42);
    assert_eq!(history.last().unwrap().date, clock.today());
    assert!(history
        .iter()
        .all(|r| r.date > clock.today() - chrono::Duration::days(60)));

    let summary = db.get_summary(user.id).unwrap();
    let expected = 5000.0 + summary.total_income - summary.total_expense;
    assert!((stats.final_balance - expected).abs() < 1e-6);
}

#[test]
fn test_seed_reuses_existing_wallet() {
    let (db, user, clock) = setup();
    let wallet = db.create_wallet(user.id, "Existing", 0.0).unwrap();

    let stats = db.seed_demo_data(user.id, &clock).unwrap();
    assert_eq!(stats.wallet_id, wallet.id);
    assert_eq!(db.list_wallets(user.id).unwrap().len(), 1);
}

#[test]
fn test_stored_created_at_is_parsed() {
    let (db, user, _) = setup();
    let wallet = db.create_wallet(user.id, "Main", 0.0).unwrap();

    db.conn()
        .unwrap()
        .execute(
            "UPDATE wallets SET created_at = '2023-07-01 08:30:00' WHERE id = ?",
            [wallet.id],
        )
        .unwrap();

    let wallet = db.get_wallet(user.id, wallet.id).unwrap().unwrap();
    assert_eq!(wallet.created_at.to_rfc3339(), "2023-07-01T08:30:00+00:00");
}

#[test]
fn test_corrupt_created_at_is_an_error() {
    let (db, user, _) = setup();
    db.create_wallet(user.id, "Main", 0.0).unwrap();

    db.conn()
        .unwrap()
        .execute("UPDATE wallets SET created_at = 'yesterday'", [])
        .unwrap();

    let result = db.list_wallets(user.id);
    assert!(matches!(result, Err(Error::Database(_))));
}
