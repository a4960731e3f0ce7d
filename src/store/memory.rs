//! In-memory document store.
//!
//! DashMap-backed implementation of [`DocumentStore`], optionally seeded from
//! a JSON snapshot file mapping collection names to document arrays. Used for
//! tests and self-contained deployments; production plugs a database behind
//! the same trait.

use super::{
    BalanceRecord, CollectionInfo, ConversationRecord, DocumentStore, MessageRecord, Page,
    PageRequest, StoreError, StoreStats, UserRecord, UserSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Fields the generic collection search looks at.
const SEARCH_FIELDS: &[&str] = &["name", "email", "username", "title", "text", "filename"];

/// Thread-safe in-memory store of free-form JSON documents.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot file: a JSON object mapping collection name to an
    /// array of documents.
    pub fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Seed {
            path: path.to_path_buf(),
            source,
        })?;
        let seed: HashMap<String, Vec<Value>> = serde_json::from_str(&content)?;

        let store = Self::new();
        let mut total = 0usize;
        for (collection, docs) in seed {
            for doc in docs {
                store.insert_sync(&collection, doc);
                total += 1;
            }
        }
        tracing::info!(documents = total, "Seeded in-memory store");
        Ok(store)
    }

    /// Synchronous insert used by seeding and tests.
    pub fn insert_sync(&self, collection: &str, mut doc: Value) -> String {
        let id = doc_id(&doc).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        if let Value::Object(map) = &mut doc {
            map.insert("_id".to_string(), Value::String(id.clone()));
        }
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), doc);
        id
    }

    fn docs(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|c| c.iter().map(|e| e.value().clone()).collect())
            .unwrap_or_default()
    }

    fn typed<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        self.docs(collection)
            .into_iter()
            .filter_map(|doc| serde_json::from_value(doc).ok())
            .collect()
    }

    /// Display name for a user id: name, else username, else email.
    fn user_display_name(&self, user_id: &str) -> Option<String> {
        let users = self.collections.get("users")?;
        let doc = users.get(user_id)?;
        for field in ["name", "username", "email"] {
            if let Some(value) = doc.get(field).and_then(Value::as_str) {
                return Some(value.to_string());
            }
        }
        None
    }
}

fn doc_id(doc: &Value) -> Option<String> {
    match doc.get("_id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn doc_matches(doc: &Value, needle: &str) -> bool {
    SEARCH_FIELDS.iter().any(|field| {
        doc.get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| contains_ci(v, needle))
    })
}

fn opt_contains(value: Option<&str>, needle: &str) -> bool {
    value.is_some_and(|v| contains_ci(v, needle))
}

/// Newest-first ordering; documents without a timestamp sort last.
fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>, StoreError> {
        let mut infos: Vec<CollectionInfo> = self
            .collections
            .iter()
            .map(|entry| CollectionInfo {
                name: entry.key().clone(),
                count: entry.value().len() as u64,
            })
            .collect();
        // `users` first, the rest alphabetical.
        infos.sort_by(|a, b| match (a.name.as_str(), b.name.as_str()) {
            ("users", _) => std::cmp::Ordering::Less,
            (_, "users") => std::cmp::Ordering::Greater,
            (a, b) => a.cmp(b),
        });
        Ok(infos)
    }

    async fn list_documents(
        &self,
        collection: &str,
        req: &PageRequest,
    ) -> Result<Page<Value>, StoreError> {
        let mut docs = self.docs(collection);
        if let Some(needle) = &req.search {
            docs.retain(|doc| doc_matches(doc, needle));
        }
        // DashMap iteration order is arbitrary; sort by id for stable pages.
        docs.sort_by_key(|doc| doc_id(doc).unwrap_or_default());
        Ok(Page::paginate(docs, req))
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|c| c.get(id).map(|doc| doc.value().clone())))
    }

    async fn insert_document(&self, collection: &str, doc: Value) -> Result<String, StoreError> {
        if !doc.is_object() {
            return Err(StoreError::InvalidDocument(
                "document must be a JSON object".to_string(),
            ));
        }
        Ok(self.insert_sync(collection, doc))
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        doc: Value,
    ) -> Result<bool, StoreError> {
        let Value::Object(fields) = doc else {
            return Err(StoreError::InvalidDocument(
                "document must be a JSON object".to_string(),
            ));
        };
        let Some(docs) = self.collections.get(collection) else {
            return Ok(false);
        };
        let Some(mut existing) = docs.get_mut(id) else {
            return Ok(false);
        };
        if let Value::Object(map) = existing.value_mut() {
            for (key, value) in fields {
                // The id is immutable.
                if key != "_id" {
                    map.insert(key, value);
                }
            }
        }
        Ok(true)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .is_some_and(|c| c.remove(id).is_some()))
    }

    async fn user_names(&self) -> Result<Vec<UserSummary>, StoreError> {
        let mut users: Vec<UserSummary> = self
            .typed::<UserRecord>("users")
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                name: u.name,
                username: u.username,
                email: u.email,
            })
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn users_page(&self, req: &PageRequest) -> Result<Page<UserRecord>, StoreError> {
        let mut users = self.typed::<UserRecord>("users");
        if let Some(needle) = &req.search {
            users.retain(|u| {
                opt_contains(u.name.as_deref(), needle)
                    || opt_contains(u.username.as_deref(), needle)
                    || opt_contains(u.email.as_deref(), needle)
            });
        }
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(Page::paginate(users, req))
    }

    async fn conversations_page(
        &self,
        req: &PageRequest,
        user_name: Option<&str>,
    ) -> Result<Page<ConversationRecord>, StoreError> {
        let mut conversations: Vec<ConversationRecord> = self
            .typed::<ConversationRecord>("conversations")
            .into_iter()
            .map(|mut conv| {
                conv.user_name = conv.user.as_deref().and_then(|u| self.user_display_name(u));
                conv
            })
            .collect();

        if let Some(filter) = user_name {
            conversations.retain(|c| opt_contains(c.user_name.as_deref(), filter));
        }
        if let Some(needle) = &req.search {
            conversations.retain(|c| {
                opt_contains(c.title.as_deref(), needle) || contains_ci(&c.conversation_id, needle)
            });
        }
        conversations.sort_by(|a, b| newest_first(a.created_at, b.created_at));
        Ok(Page::paginate(conversations, req))
    }

    async fn messages_page(
        &self,
        req: &PageRequest,
        conversation_id: Option<&str>,
        user_name: Option<&str>,
    ) -> Result<Page<MessageRecord>, StoreError> {
        let mut messages: Vec<MessageRecord> = self
            .typed::<MessageRecord>("messages")
            .into_iter()
            .map(|mut msg| {
                msg.user_name = msg.user.as_deref().and_then(|u| self.user_display_name(u));
                msg
            })
            .collect();

        if let Some(conv) = conversation_id {
            messages.retain(|m| m.conversation_id == conv);
        }
        if let Some(filter) = user_name {
            messages.retain(|m| opt_contains(m.user_name.as_deref(), filter));
        }
        if let Some(needle) = &req.search {
            messages.retain(|m| {
                opt_contains(m.text.as_deref(), needle) || contains_ci(&m.message_id, needle)
            });
        }
        messages.sort_by(|a, b| newest_first(a.created_at, b.created_at));
        Ok(Page::paginate(messages, req))
    }

    async fn messages_for_user(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        let mut messages: Vec<MessageRecord> = self
            .typed::<MessageRecord>("messages")
            .into_iter()
            .filter(|m| m.user.as_deref() == Some(user_id))
            .collect();
        if let Some(cutoff) = since {
            messages.retain(|m| m.created_at.is_some_and(|t| t >= cutoff));
        }
        messages.sort_by(|a, b| newest_first(b.created_at, a.created_at));
        Ok(messages)
    }

    async fn messages_for_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        let mut messages: Vec<MessageRecord> = self
            .typed::<MessageRecord>("messages")
            .into_iter()
            .filter(|m| m.conversation_id == conversation_id)
            .collect();
        messages.sort_by(|a, b| newest_first(b.created_at, a.created_at));
        Ok(messages)
    }

    async fn balance_for_user(&self, user_id: &str) -> Result<Option<BalanceRecord>, StoreError> {
        Ok(self
            .typed::<BalanceRecord>("balances")
            .into_iter()
            .find(|b| b.user == user_id))
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        let collection_stats = self.list_collections().await?;
        Ok(StoreStats {
            collections: collection_stats.len(),
            documents: collection_stats.iter().map(|c| c.count).sum(),
            collection_stats,
        })
    }
}
