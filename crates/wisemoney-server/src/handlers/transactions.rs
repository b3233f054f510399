//! Income and expense handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::{current_user, parse_date, read_json, AppError, AppState};
use wisemoney_core::models::{Expense, Income, NewExpense, NewIncome};

/// Request body for recording an income
#[derive(Debug, Deserialize)]
pub struct CreateIncomeRequest {
    pub amount: f64,
    pub source: String,
    /// YYYY-MM-DD or RFC 3339; defaults to today
    pub date: Option<String>,
    pub wallet_id: Option<i64>,
}

/// Request body for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub category: String,
    /// YYYY-MM-DD or RFC 3339; defaults to today
    pub date: Option<String>,
    pub wallet_id: Option<i64>,
}

/// GET /api/incomes - List the caller's incomes, newest first
pub async fn list_incomes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Income>>, AppError> {
    let user = current_user(&state, &headers)?;
    Ok(Json(state.db.list_incomes(user.id)?))
}

/// POST /api/incomes - Record an income
pub async fn create_income(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Income>, AppError> {
    let user = current_user(&state, request.headers())?;
    let req: CreateIncomeRequest = read_json(request).await?;

    let income = NewIncome {
        amount: req.amount,
        source: req.source,
        date: req.date.as_deref().map(parse_date).transpose()?,
        wallet_id: req.wallet_id,
    };

    Ok(Json(state.db.add_income(user.id, &income, state.clock.as_ref())?))
}

/// GET /api/expenses - List the caller's expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Expense>>, AppError> {
    let user = current_user(&state, &headers)?;
    Ok(Json(state.db.list_expenses(user.id)?))
}

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Expense>, AppError> {
    let user = current_user(&state, request.headers())?;
    let req: CreateExpenseRequest = read_json(request).await?;

    let expense = NewExpense {
        amount: req.amount,
        category: req.category,
        date: req.date.as_deref().map(parse_date).transpose()?,
        wallet_id: req.wallet_id,
    };

    Ok(Json(state.db.add_expense(user.id, &expense, state.clock.as_ref())?))
}
