//! Generic collection browser: listing, search and document CRUD.

use crate::api::auth::AuthSession;
use crate::api::error::ApiError;
use crate::api::types::{ListQuery, Paginated};
use crate::api::AppState;
use crate::store::{CollectionInfo, PageRequest};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

fn page_request(query: &ListQuery) -> PageRequest {
    PageRequest::new(query.page, query.limit).with_search(query.search.clone())
}

/// GET /api/collections
pub async fn list_collections(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
) -> Result<Json<Vec<CollectionInfo>>, ApiError> {
    Ok(Json(state.store.list_collections().await?))
}

/// GET /api/collection/:name
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Path(name): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Paginated<Value>>, ApiError> {
    let page = state
        .store
        .list_documents(&name, &page_request(&query))
        .await?;
    Ok(Json(page.into()))
}

/// GET /api/collection/:name/:id
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    state
        .store
        .get_document(&name, &id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /api/collection/:name
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Path(name): Path<String>,
    Json(doc): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let id = state.store.insert_document(&name, doc).await?;
    tracing::debug!(collection = %name, id = %id, "Inserted document");
    Ok(Json(json!({ "success": true, "insertedId": id })))
}

/// PUT /api/collection/:name/:id
pub async fn update_document(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Path((name, id)): Path<(String, String)>,
    Json(doc): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    if state.store.update_document(&name, &id, doc).await? {
        Ok(Json(json!({ "success": true, "modifiedCount": 1 })))
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/collection/:name/:id
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Path((name, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete_document(&name, &id).await? {
        tracing::debug!(collection = %name, id = %id, "Deleted document");
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::NotFound)
    }
}
