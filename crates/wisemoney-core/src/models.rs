//! Domain models for WiseMoney

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user, identified by the email the fronting auth layer vouches for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A named wallet holding a running balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured transaction extracted from free text, pending user acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionProposal {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    /// 0.8 when a keyword matched, 0.5 when the kind was defaulted
    pub confidence: f64,
}

/// A recorded income
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: i64,
    pub wallet_id: Option<i64>,
    pub source: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub wallet_id: Option<i64>,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// New income for insertion
///
/// `date: None` means "today" as reported by the caller's clock at insert time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewIncome {
    pub amount: f64,
    pub source: String,
    pub date: Option<NaiveDate>,
    pub wallet_id: Option<i64>,
}

/// New expense for insertion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub date: Option<NaiveDate>,
    pub wallet_id: Option<i64>,
}

/// One historical expense as seen by the forecaster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Predicted spending for one future day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_amount: f64,
}

// ========== Report Models ==========

/// Spending total for one expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    pub transaction_count: i64,
}

/// Totals across all of a user's records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_wallet_balance: f64,
    /// Wallet balances plus incomes and expenses not attached to a wallet
    pub net_balance: f64,
    pub expense_by_category: Vec<CategoryTotal>,
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// "YYYY-MM"
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// Flattened income/expense row for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub amount: f64,
    /// Income source or expense category
    pub description: String,
    pub wallet_id: Option<i64>,
}

/// Result of seeding demo data
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedStats {
    pub wallet_id: i64,
    pub incomes: usize,
    pub expenses: usize,
    pub final_balance: f64,
}

/// An income or expense as stored, tagged with its kind
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RecordedTransaction {
    Income(Income),
    Expense(Expense),
}

impl RecordedTransaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::Income(_) => TransactionKind::Income,
            Self::Expense(_) => TransactionKind::Expense,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            Self::Income(i) => i.amount,
            Self::Expense(e) => e.amount,
        }
    }
}
