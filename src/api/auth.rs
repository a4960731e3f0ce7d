//! Session-based dashboard authentication.
//!
//! Opaque bearer tokens held in an in-memory session store. Credentials come
//! from [`AuthConfig`](crate::config::AuthConfig); there is a single admin
//! identity.

use crate::api::error::ApiError;
use crate::api::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One live login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Thread-safe store of active session tokens.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: u64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::hours(ttl_hours as i64),
        }
    }

    /// Create a session and return its opaque token.
    pub fn create(&self, username: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    /// Look up a live session; expired tokens are dropped on access.
    pub fn get(&self, token: &str) -> Option<Session> {
        let session = self.sessions.get(token)?.clone();
        if session.expires_at <= Utc::now() {
            drop(self.sessions.remove(token));
            return None;
        }
        Some(session)
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .or_else(|| headers.get("x-session-token").and_then(|v| v.to_str().ok()))
}

/// Extractor that rejects requests without a live session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub username: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let session = state.sessions.get(token).ok_or(ApiError::Unauthorized)?;
        Ok(AuthSession {
            token: token.to_string(),
            username: session.username,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let auth = &state.config.auth;
    if request.username != auth.admin_username || request.password != auth.admin_password {
        tracing::warn!(username = %request.username, "Rejected login attempt");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.sessions.create(&request.username);
    tracing::info!(username = %request.username, "Dashboard login");
    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// POST /api/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Json<serde_json::Value> {
    state.sessions.revoke(&session.token);
    Json(serde_json::json!({ "success": true }))
}

/// GET /api/auth/status
pub async fn status(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<AuthStatus> {
    let authenticated = bearer_token(&headers)
        .and_then(|token| state.sessions.get(token))
        .is_some();
    Json(AuthStatus { authenticated })
}
