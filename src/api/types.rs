//! Request and response types for the dashboard API.

use crate::analytics::CostTotals;
use crate::pricing::Resolution;
use crate::store::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    20
}

/// Pagination/search query parameters shared by listing endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub search: Option<String>,
}

// The enhanced-listing queries repeat the pagination fields instead of
// flattening ListQuery: serde's flatten buffers values as strings, which
// breaks numeric fields under urlencoded deserialization.

/// Query parameters for `/api/users/enhanced`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub search: Option<String>,
    /// `24hours`, `30days` (default), `90days` or `all`.
    #[serde(default, rename = "timePeriod")]
    pub time_period: Option<String>,
}

/// Query parameters for `/api/conversations/enhanced`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationsQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "userName")]
    pub user_name: Option<String>,
}

/// Query parameters for `/api/messages/enhanced`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "userName")]
    pub user_name: Option<String>,
    #[serde(default, rename = "conversationId")]
    pub conversation_id: Option<String>,
}

/// Pagination metadata mirrored to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Standard paginated envelope: `{ documents, pagination }`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub documents: Vec<T>,
    pub pagination: PaginationMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_period: Option<String>,
}

impl<T> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            pagination: PaginationMeta {
                page: page.page,
                limit: page.limit,
                total: page.total,
                total_pages: page.total_pages,
            },
            documents: page.documents,
            time_period: None,
        }
    }
}

impl<T> Paginated<T> {
    pub fn with_time_period(mut self, period: &str) -> Self {
        self.time_period = Some(period.to_string());
        self
    }
}

/// A user row with usage and cost totals attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedUser {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Totals inside the requested time window.
    pub usage: CostTotals,
    /// Totals over the user's entire history.
    pub lifetime: CostTotals,
    /// Remaining token credits, when a balance document exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_credits: Option<f64>,
}

/// A conversation row with whole-conversation cost totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedConversation {
    pub conversation_id: String,
    pub title: String,
    pub user_name: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub usage: CostTotals,
    pub initial_prompt: String,
}

/// A message row with its individual cost.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedMessage {
    pub message_id: String,
    pub conversation_id: String,
    pub user_name: String,
    /// Display model; carries the inferred marker when borrowed from a reply.
    pub model: String,
    pub sender: String,
    pub text: String,
    pub token_count: u32,
    pub cost: f64,
    /// How the rate was found: exact, aliased, default or neutral.
    pub resolution: Resolution,
    pub is_user_authored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 20);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_paginated_envelope_shape() {
        let page = Page::paginate(vec![1, 2, 3], &crate::store::PageRequest::new(1, 2));
        let body: Paginated<i32> = Paginated::from(page).with_time_period("30days");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["documents"], serde_json::json!([1, 2]));
        assert_eq!(json["pagination"]["totalPages"], 2);
        assert_eq!(json["timePeriod"], "30days");
    }
}
