//! Authentication-related handlers

use axum::http::HeaderMap;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{current_user, get_user_email, AppError, AppState, API_KEY_USER, LOCAL_DEV_USER};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's email or identifier
    pub user: String,
    pub user_id: i64,
    pub name: Option<String>,
    /// How the user was authenticated
    pub auth_method: &'static str,
}

/// Get the currently authenticated user
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AppError> {
    let identity = get_user_email(&headers);
    let auth_method = match identity.as_str() {
        API_KEY_USER => "api_key",
        LOCAL_DEV_USER => "none",
        _ => "cloudflare_access",
    };

    let user = current_user(&state, &headers)?;

    Ok(Json(MeResponse {
        user: user.email,
        user_id: user.id,
        name: user.name,
        auth_method,
    }))
}

/// GET /api/health - Liveness check (no auth)
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
