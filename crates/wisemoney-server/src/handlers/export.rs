//! Export handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderMap, Response, StatusCode},
};
use serde::Deserialize;
use tracing::info;

use crate::{current_user, AppError, AppState};
use wisemoney_core::ExportFormat;

/// Query parameters for export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Output format (default: csv)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "csv".to_string()
}

/// GET /api/reports/export - Download all incomes and expenses
pub async fn export_report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ExportQuery>,
) -> Result<Response<Body>, AppError> {
    let user = current_user(&state, &headers)?;

    let format: ExportFormat = params
        .format
        .parse()
        .map_err(|_| AppError::bad_request("Invalid format. Use 'csv' or 'json'"))?;

    let rows = state.db.export_rows(user.id)?;
    let body = format.render(&rows)?;
    info!(user = %user.email, format = format.as_str(), rows = rows.len(), "Exported transactions");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"wisemoney.{}\"", format.as_str()),
        )
        .body(Body::from(body))
        .map_err(|e| AppError::internal(&e.to_string()))
}
