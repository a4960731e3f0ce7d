//! # Dashboard API
//!
//! HTTP endpoints for the tokenlens operator dashboard.
//!
//! ## Endpoints
//!
//! - `POST /api/login`, `POST /api/logout`, `GET /api/auth/status` - Session auth
//! - `GET /api/collections` - Collection names with counts
//! - `GET/POST/PUT/DELETE /api/collection/...` - Generic document browser
//! - `GET /api/users/names` - User identities for filter dropdowns
//! - `GET /api/users/enhanced` - Users with windowed and lifetime cost totals
//! - `GET /api/conversations/enhanced` - Conversations with cost totals
//! - `GET /api/messages/enhanced` - Messages with per-message cost
//! - `GET /api/stats` - Store-wide statistics
//! - `GET /health` - Unauthenticated liveness probe
//! - `GET /` - Embedded dashboard frontend
//!
//! ## Example
//!
//! ```no_run
//! use tokenlens::api::{AppState, create_router};
//! use tokenlens::config::TokenlensConfig;
//! use tokenlens::store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let config = Arc::new(TokenlensConfig::default());
//!
//! let state = Arc::new(AppState::new(store, config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All errors leave the service as `{"error": "..."}` with an appropriate
//! status code.

mod analytics;
pub mod auth;
mod collections;
mod dashboard;
mod error;
mod stats;
pub mod types;

pub use auth::SessionStore;
pub use error::ApiError;
pub use types::*;

use crate::analytics::CostEngine;
use crate::config::TokenlensConfig;
use crate::pricing::RateTable;
use crate::store::DocumentStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (2 MB).
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<TokenlensConfig>,
    pub engine: CostEngine,
    pub sessions: SessionStore,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state with the given store and configuration.
    pub fn new(store: Arc<dyn DocumentStore>, config: Arc<TokenlensConfig>) -> Self {
        let sessions = SessionStore::new(config.auth.session_ttl_hours);
        let engine = CostEngine::new(Arc::new(RateTable::default_table()));

        Self {
            store,
            config,
            engine,
            sessions,
            start_time: Instant::now(),
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/", get(dashboard::index_handler))
        .route("/static/*path", get(dashboard::asset_handler))
        .route("/health", get(stats::health))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/auth/status", get(auth::status))
        .route("/api/collections", get(collections::list_collections))
        .route(
            "/api/collection/:name",
            get(collections::list_documents).post(collections::create_document),
        )
        .route(
            "/api/collection/:name/:id",
            get(collections::get_document)
                .put(collections::update_document)
                .delete(collections::delete_document),
        )
        .route("/api/users/names", get(analytics::user_names))
        .route("/api/users/enhanced", get(analytics::users_enhanced))
        .route(
            "/api/conversations/enhanced",
            get(analytics::conversations_enhanced),
        )
        .route("/api/messages/enhanced", get(analytics::messages_enhanced))
        .route("/api/stats", get(stats::stats))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "request",
                id = %crate::logging::generate_request_id(),
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}
