//! Document store seam.
//!
//! The dashboard reads (and, for the collection browser, writes) free-form
//! JSON documents owned by the chat platform. Everything the analytics core
//! needs is expressed through the [`DocumentStore`] trait so a deployment can
//! plug in its own database; an in-memory implementation ships in-tree for
//! tests and self-contained demos.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("document not found: {collection}/{id}")]
    DocumentNotFound { collection: String, id: String },

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("seed file error: {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed parse error: {0}")]
    SeedParse(#[from] serde_json::Error),
}

/// One message document, projected to the fields cost attribution reads.
///
/// Documents are free-form; any field may be missing and deserialization
/// must not fail because of it. A missing `token_count` counts as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageRecord {
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_message_id: Option<String>,
    pub conversation_id: String,
    /// Owning user id, stringified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(rename = "isCreatedByUser")]
    pub is_user_authored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Display name of the owning user, joined in by the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// A user document, projected for listing and filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A conversation document, projected for the enhanced listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversationRecord {
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Display name of the owning user, joined in by the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

/// Read-only balance record: remaining token credits for one user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceRecord {
    pub user: String,
    pub token_credits: f64,
}

/// Minimal user identity for filter dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Collection name plus document count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub count: u64,
}

/// Store-wide statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub collections: usize,
    pub documents: u64,
    pub collection_stats: Vec<CollectionInfo>,
}

/// Pagination and search parameters for listing queries.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// 1-based page number; 0 is treated as 1.
    pub page: usize,
    pub limit: usize,
    /// Case-insensitive containment search over the listing's text fields.
    pub search: Option<String>,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            search: None,
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.is_empty());
        self
    }

    pub(crate) fn skip(&self) -> usize {
        self.page.max(1).saturating_sub(1) * self.limit
    }
}

/// One page of results with pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub documents: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` (already filtered and sorted) down to one page.
    pub fn paginate(items: Vec<T>, req: &PageRequest) -> Self {
        let total = items.len();
        let limit = req.limit.max(1);
        let page = req.page.max(1);
        let documents: Vec<T> = items.into_iter().skip(req.skip()).take(limit).collect();
        Self {
            documents,
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            documents: self.documents.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Query capabilities the dashboard needs from the platform's document store.
///
/// Typed accessors are lenient projections: documents that do not fit the
/// expected shape are skipped, never a hard error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All collections with counts, `users` first then alphabetical.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>, StoreError>;

    /// Raw documents of one collection, paginated and searched.
    async fn list_documents(
        &self,
        collection: &str,
        req: &PageRequest,
    ) -> Result<Page<Value>, StoreError>;

    async fn get_document(&self, collection: &str, id: &str)
        -> Result<Option<Value>, StoreError>;

    /// Insert a document, returning its id (generated when absent).
    async fn insert_document(&self, collection: &str, doc: Value) -> Result<String, StoreError>;

    /// Replace-style update of the non-`_id` fields. Returns false when the
    /// document does not exist.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        doc: Value,
    ) -> Result<bool, StoreError>;

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Identities of all users, sorted by name.
    async fn user_names(&self) -> Result<Vec<UserSummary>, StoreError>;

    /// Users page; search covers name, username and email.
    async fn users_page(&self, req: &PageRequest) -> Result<Page<UserRecord>, StoreError>;

    /// Conversations page, newest first; search covers title and
    /// conversation id; `user_name` filters on the joined owner name.
    async fn conversations_page(
        &self,
        req: &PageRequest,
        user_name: Option<&str>,
    ) -> Result<Page<ConversationRecord>, StoreError>;

    /// Messages page, newest first; search covers text and message id.
    async fn messages_page(
        &self,
        req: &PageRequest,
        conversation_id: Option<&str>,
        user_name: Option<&str>,
    ) -> Result<Page<MessageRecord>, StoreError>;

    /// All messages authored under `user_id`, optionally only those created
    /// at or after `since`.
    async fn messages_for_user(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MessageRecord>, StoreError>;

    /// All messages of one conversation, oldest first.
    async fn messages_for_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<MessageRecord>, StoreError>;

    /// Remaining token credits for one user, if a balance document exists.
    async fn balance_for_user(&self, user_id: &str) -> Result<Option<BalanceRecord>, StoreError>;

    async fn stats(&self) -> Result<StoreStats, StoreError>;
}
