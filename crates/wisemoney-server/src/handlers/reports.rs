//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{current_user, AppError, AppState};
use wisemoney_core::models::{ForecastPoint, MonthlyTrend, Summary};

/// Query parameters for the monthly trend report
#[derive(Debug, Deserialize)]
pub struct ReportTrendQuery {
    /// Most recent months to include (default from config)
    pub months: Option<u32>,
}

/// Query parameters for the spending forecast
#[derive(Debug, Deserialize)]
pub struct ReportForecastQuery {
    /// Days to predict (default from config)
    pub days: Option<u32>,
}

/// Response for GET /api/reports/forecast
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub forecast: Vec<ForecastPoint>,
    pub days: u32,
    /// Distinct days of expense history the trend was fitted on
    pub history_days: usize,
}

/// GET /api/reports/summary - Income, expense and balance totals
pub async fn report_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Summary>, AppError> {
    let user = current_user(&state, &headers)?;
    Ok(Json(state.db.get_summary(user.id)?))
}

/// GET /api/reports/trend - Income and expense per month
pub async fn report_trend(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReportTrendQuery>,
) -> Result<Json<Vec<MonthlyTrend>>, AppError> {
    let user = current_user(&state, &headers)?;

    let months = params.months.unwrap_or(state.config.reports.trend_months);
    if months == 0 {
        return Err(AppError::bad_request("months must be at least 1"));
    }

    Ok(Json(state.db.get_monthly_trend(user.id, Some(months))?))
}

/// GET /api/reports/forecast - Predicted daily spending
pub async fn report_forecast(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ReportForecastQuery>,
) -> Result<Json<ForecastResponse>, AppError> {
    let user = current_user(&state, &headers)?;

    let days = params.days.unwrap_or(state.config.forecast.default_days);
    let max_days = state.config.forecast.max_days;
    if days == 0 || days > max_days {
        return Err(AppError::bad_request(&format!(
            "days must be between 1 and {}",
            max_days
        )));
    }

    let history = state.db.expense_history(user.id)?;
    let points = state.forecaster.forecast(&history, days)?;
    let history_days = points.history_days();
    let forecast: Vec<ForecastPoint> = points.collect();

    debug!(user = %user.email, days, history_days, "Computed forecast");

    Ok(Json(ForecastResponse {
        forecast,
        days,
        history_days,
    }))
}
