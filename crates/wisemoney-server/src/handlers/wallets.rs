//! Wallet handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{current_user, read_json, AppError, AppState};
use wisemoney_core::models::Wallet;

/// Request body for creating a wallet
#[derive(Debug, Deserialize)]
pub struct CreateWalletRequest {
    pub name: String,
    #[serde(default)]
    pub balance: f64,
}

/// GET /api/wallets - List the caller's wallets
pub async fn list_wallets(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Wallet>>, AppError> {
    let user = current_user(&state, &headers)?;
    Ok(Json(state.db.list_wallets(user.id)?))
}

/// POST /api/wallets - Create a wallet with an opening balance
pub async fn create_wallet(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Wallet>, AppError> {
    let user = current_user(&state, request.headers())?;
    let req: CreateWalletRequest = read_json(request).await?;

    let wallet = state.db.create_wallet(user.id, &req.name, req.balance)?;
    info!(user = %user.email, wallet_id = wallet.id, "Created wallet");

    Ok(Json(wallet))
}
