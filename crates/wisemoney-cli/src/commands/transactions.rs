//! Income and expense command implementations

use anyhow::Result;
use wisemoney_core::clock::Clock;
use wisemoney_core::db::Database;
use wisemoney_core::models::{NewExpense, NewIncome, User};

use super::{money, parse_date_arg, truncate};

pub fn cmd_income_add(
    db: &Database,
    user: &User,
    amount: f64,
    source: &str,
    date: Option<&str>,
    wallet_id: Option<i64>,
    clock: &dyn Clock,
) -> Result<()> {
    let income = NewIncome {
        amount,
        source: source.to_string(),
        date: date.map(parse_date_arg).transpose()?,
        wallet_id,
    };

    let recorded = db.add_income(user.id, &income, clock)?;
    println!(
        "✅ Recorded income #{}: {} from {} on {}",
        recorded.id,
        money(recorded.amount),
        recorded.source,
        recorded.date
    );
    Ok(())
}

pub fn cmd_income_list(db: &Database, user: &User) -> Result<()> {
    let incomes = db.list_incomes(user.id)?;

    if incomes.is_empty() {
        println!("No incomes recorded.");
        return Ok(());
    }

    println!();
    println!("💰 Incomes");
    println!("   ─────────────────────────────────────────────────────────────");

    for income in incomes {
        println!(
            "   {} │ \x1b[32m{:>12}\x1b[0m │ {}",
            income.date,
            money(income.amount),
            truncate(&income.source, 40)
        );
    }

    Ok(())
}

pub fn cmd_expense_add(
    db: &Database,
    user: &User,
    amount: f64,
    category: &str,
    date: Option<&str>,
    wallet_id: Option<i64>,
    clock: &dyn Clock,
) -> Result<()> {
    let expense = NewExpense {
        amount,
        category: category.to_string(),
        date: date.map(parse_date_arg).transpose()?,
        wallet_id,
    };

    let recorded = db.add_expense(user.id, &expense, clock)?;
    println!(
        "✅ Recorded expense #{}: {} on {} ({})",
        recorded.id,
        money(recorded.amount),
        recorded.category,
        recorded.date
    );
    Ok(())
}

pub fn cmd_expense_list(db: &Database, user: &User) -> Result<()> {
    let expenses = db.list_expenses(user.id)?;

    if expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!();
    println!("🧾 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in expenses {
        println!(
            "   {} │ \x1b[31m{:>12}\x1b[0m │ {}",
            expense.date,
            money(expense.amount),
            truncate(&expense.category, 40)
        );
    }

    Ok(())
}
