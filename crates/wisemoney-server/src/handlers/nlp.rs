//! Natural-language transaction entry

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{current_user, read_json, AppError, AppState};
use wisemoney_core::models::{RecordedTransaction, TransactionProposal};

/// Request body for parsing free text
#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

/// Request body for parsing and saving free text
#[derive(Debug, Deserialize)]
pub struct AddFromTextRequest {
    pub text: String,
    /// Defaults to the caller's first wallet
    pub wallet_id: Option<i64>,
}

/// Response for POST /api/nlp/add
#[derive(Debug, Serialize)]
pub struct AddFromTextResponse {
    pub proposal: TransactionProposal,
    pub transaction: RecordedTransaction,
}

/// POST /api/nlp/parse - Propose a transaction from text (`null` when no amount)
pub async fn parse_text(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Option<TransactionProposal>>, AppError> {
    let req: ParseTextRequest = read_json(request).await?;
    Ok(Json(state.parser.parse(&req.text)))
}

/// POST /api/nlp/add - Parse text and record it against a wallet
pub async fn add_from_text(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AddFromTextResponse>, AppError> {
    let user = current_user(&state, request.headers())?;
    let req: AddFromTextRequest = read_json(request).await?;

    let proposal = state.parser.parse(&req.text).ok_or_else(|| {
        AppError::bad_request("No amount found in text; try something like 'Spent 500 on Pizza'")
    })?;

    let wallet_id = match req.wallet_id {
        Some(id) => id,
        None => state
            .db
            .list_wallets(user.id)?
            .first()
            .map(|w| w.id)
            .ok_or_else(|| AppError::bad_request("No wallet found; create a wallet first"))?,
    };

    let transaction =
        state
            .db
            .add_proposal(user.id, &proposal, Some(wallet_id), state.clock.as_ref())?;

    info!(
        user = %user.email,
        kind = %proposal.kind,
        amount = proposal.amount,
        wallet_id,
        "Recorded transaction from text"
    );

    Ok(Json(AddFromTextResponse {
        proposal,
        transaction,
    }))
}
