//! WiseMoney Web Server
//!
//! Axum-based REST API for the WiseMoney personal finance tracker.
//!
//! Security features:
//! - Cloudflare Access or API key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Request body size limits
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use wisemoney_core::clock::{Clock, SystemClock};
use wisemoney_core::config::{Config, ForecastSettings, ReportSettings};
use wisemoney_core::db::Database;
use wisemoney_core::models::User;
use wisemoney_core::{SpendingForecaster, TransactionParser};

mod handlers;

/// Maximum JSON request body size (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Cloudflare Access header for authenticated user email
const CF_ACCESS_USER_HEADER: &str = "cf-access-authenticated-user-email";

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Identity used for API key requests
pub const API_KEY_USER: &str = "api-key";

/// Identity used when authentication is disabled
pub const LOCAL_DEV_USER: &str = "local-dev";

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys for service authentication (alternative to Cloudflare Access)
    /// Format: "Bearer <key>" in Authorization header
    pub api_keys: Vec<String>,
    pub forecast: ForecastSettings,
    pub reports: ReportSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
            forecast: ForecastSettings::default(),
            reports: ReportSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Server settings derived from the application config file
    pub fn from_app_config(config: &Config) -> Self {
        Self {
            allowed_origins: config.server.allowed_origins.clone(),
            forecast: config.forecast.clone(),
            reports: config.reports.clone(),
            ..Default::default()
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Source of "today" for default dates and forecast windows
    pub clock: Arc<dyn Clock>,
    pub parser: TransactionParser,
    pub forecaster: SpendingForecaster,
}

/// Authentication middleware - accepts Cloudflare Access headers or API keys
///
/// # Security Notes
///
/// **Cloudflare Access headers**: The `CF-Access-Authenticated-User-Email` header is
/// safe behind Cloudflare Tunnel (which strips/rewrites CF headers), but can be spoofed
/// if the server is exposed directly to the internet.
///
/// **API keys**: Compared using constant-time comparison to prevent timing attacks.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let cf_user = request
        .headers()
        .get(CF_ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());

    if let Some(email) = cf_user {
        info!(user = %email, path = %request.uri().path(), "Authenticated via Cloudflare Access header");
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        info!(user = API_KEY_USER, path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

/// Validate an API key against the configured keys using constant-time comparison
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    valid_keys.iter().any(|key| {
        let key_bytes = key.as_bytes();
        // Only compare if lengths match (constant-time for same-length keys)
        provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes))
    })
}

/// Parse a comma-separated list of API keys, ignoring blanks
pub fn parse_api_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract the caller's identity from request headers
/// Returns CF Access email, "api-key" for API key auth, or "local-dev" for unauthenticated
pub fn get_user_email(headers: &HeaderMap) -> String {
    if let Some(email) = headers
        .get(CF_ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        return email.to_string();
    }

    if headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .is_some()
    {
        return API_KEY_USER.to_string();
    }

    LOCAL_DEV_USER.to_string()
}

/// Resolve the caller to a stored user, provisioning it on first sight
pub(crate) fn current_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let email = get_user_email(headers);
    Ok(state.db.ensure_user(&email, None)?)
}

/// Read and deserialize a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// Parse a request date: `YYYY-MM-DD` or RFC 3339 (date part kept)
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| {
            AppError::bad_request(&format!(
                "Invalid date '{}' (use YYYY-MM-DD or RFC 3339)",
                value
            ))
        })
}

/// Create the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    create_router_with_clock(db, config, Arc::new(SystemClock))
}

/// Create the application router with an explicit clock (for testing)
pub fn create_router_with_clock(
    db: Database,
    config: ServerConfig,
    clock: Arc<dyn Clock>,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        forecaster: SpendingForecaster::with_clock(clock.clone()),
        clock,
        parser: TransactionParser::new(),
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Wallets
        .route(
            "/wallets",
            get(handlers::list_wallets).post(handlers::create_wallet),
        )
        // Transactions
        .route(
            "/incomes",
            get(handlers::list_incomes).post(handlers::create_income),
        )
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        // Natural language entry
        .route("/nlp/parse", post(handlers::parse_text))
        .route("/nlp/add", post(handlers::add_from_text))
        // Reports
        .route("/reports/summary", get(handlers::report_summary))
        .route("/reports/trend", get(handlers::report_trend))
        .route("/reports/forecast", get(handlers::report_forecast))
        .route("/reports/export", get(handlers::export_report));

    let cors_methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(cors_methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(cors_methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        // Health stays reachable without credentials
        .route("/api/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        info!("No API keys configured; only Cloudflare Access requests will be accepted");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<wisemoney_core::Error> for AppError {
    fn from(err: wisemoney_core::Error) -> Self {
        use wisemoney_core::Error;

        match err {
            Error::NotFound(what) => Self::not_found(&format!("Not found: {}", what)),
            Error::InvalidData(msg) => Self::bad_request(&msg),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                // Return generic message to client
                message: "An internal error occurred".to_string(),
                // Keep full error for logging
                internal: Some(other.into()),
            },
        }
    }
}
