//! Enhanced analytics endpoints: listings with cost totals attached.
//!
//! Each request pulls its message set from the store and computes totals in
//! isolation; per-row aggregations fan out concurrently and are reassembled
//! in page order.

use crate::analytics::TimeWindow;
use crate::api::auth::AuthSession;
use crate::api::error::ApiError;
use crate::api::types::{
    ConversationsQuery, EnhancedConversation, EnhancedMessage, EnhancedUser, MessagesQuery,
    Paginated, PaginationMeta, UsersQuery,
};
use crate::api::AppState;
use crate::store::{MessageRecord, PageRequest, UserSummary};
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;

fn meta<T>(page: &crate::store::Page<T>) -> PaginationMeta {
    PaginationMeta {
        page: page.page,
        limit: page.limit,
        total: page.total,
        total_pages: page.total_pages,
    }
}

/// Unknown period strings fall back to no time filter rather than failing
/// the page.
fn parse_window(time_period: Option<&str>) -> TimeWindow {
    match time_period {
        Some(s) => s.parse().unwrap_or(TimeWindow::AllTime),
        None => TimeWindow::default(),
    }
}

/// GET /api/users/names
pub async fn user_names(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    Ok(Json(state.store.user_names().await?))
}

/// GET /api/users/enhanced
pub async fn users_enhanced(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Paginated<EnhancedUser>>, ApiError> {
    let window = parse_window(query.time_period.as_deref());
    let now = Utc::now();

    let req = PageRequest::new(query.page, query.limit).with_search(query.search.clone());
    let page = state.store.users_page(&req).await?;
    let pagination = meta(&page);

    let tasks = page.documents.into_iter().map(|user| {
        let state = Arc::clone(&state);
        async move {
            let messages = state.store.messages_for_user(&user.id, None).await?;
            let usage = state.engine.aggregate_window(&messages, window, now);
            let lifetime = state.engine.aggregate(&messages);
            let balance = state.store.balance_for_user(&user.id).await?;

            Ok::<EnhancedUser, ApiError>(EnhancedUser {
                id: user.id,
                name: user.name.unwrap_or_else(|| "N/A".to_string()),
                username: user.username.unwrap_or_else(|| "N/A".to_string()),
                email: user.email.unwrap_or_else(|| "N/A".to_string()),
                role: user.role.unwrap_or_else(|| "user".to_string()),
                created_at: user.created_at,
                usage,
                lifetime,
                token_credits: balance.map(|b| b.token_credits),
            })
        }
    });
    let documents = try_join_all(tasks).await?;

    Ok(Json(Paginated {
        documents,
        pagination,
        time_period: Some(window.as_str().to_string()),
    }))
}

/// GET /api/conversations/enhanced
pub async fn conversations_enhanced(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Query(query): Query<ConversationsQuery>,
) -> Result<Json<Paginated<EnhancedConversation>>, ApiError> {
    let req = PageRequest::new(query.page, query.limit).with_search(query.search.clone());
    let page = state
        .store
        .conversations_page(&req, query.user_name.as_deref())
        .await?;
    let pagination = meta(&page);

    let tasks = page.documents.into_iter().map(|conv| {
        let state = Arc::clone(&state);
        async move {
            let messages = state
                .store
                .messages_for_conversation(&conv.conversation_id)
                .await?;
            let usage = state.engine.aggregate(&messages);

            // Messages arrive oldest first; the first user-authored one with
            // text is the initial prompt.
            let initial_prompt = messages
                .iter()
                .find(|m| m.is_user_authored && m.text.is_some())
                .and_then(|m| m.text.clone())
                .unwrap_or_else(|| "No message found".to_string());

            Ok::<EnhancedConversation, ApiError>(EnhancedConversation {
                conversation_id: conv.conversation_id,
                title: conv.title.unwrap_or_else(|| "Untitled".to_string()),
                user_name: conv.user_name.unwrap_or_else(|| "Unknown".to_string()),
                model: conv.model.unwrap_or_else(|| "-".to_string()),
                created_at: conv.created_at,
                usage,
                initial_prompt,
            })
        }
    });
    let documents = try_join_all(tasks).await?;

    Ok(Json(Paginated {
        documents,
        pagination,
        time_period: None,
    }))
}

/// GET /api/messages/enhanced
pub async fn messages_enhanced(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Paginated<EnhancedMessage>>, ApiError> {
    let req = PageRequest::new(query.page, query.limit).with_search(query.search.clone());
    let page = state
        .store
        .messages_page(
            &req,
            query.conversation_id.as_deref(),
            query.user_name.as_deref(),
        )
        .await?;
    let pagination = meta(&page);

    let tasks = page.documents.into_iter().map(|msg| {
        let state = Arc::clone(&state);
        async move {
            // Model inference needs the reply, which may fall outside this
            // page; search the message's whole conversation.
            let conversation = state
                .store
                .messages_for_conversation(&msg.conversation_id)
                .await?;
            let set: Vec<&MessageRecord> = conversation.iter().collect();
            let priced = state.engine.price_message(&msg, &set);

            let sender = msg.sender.clone().unwrap_or_else(|| {
                if msg.is_user_authored {
                    "User".to_string()
                } else {
                    "Assistant".to_string()
                }
            });

            Ok::<EnhancedMessage, ApiError>(EnhancedMessage {
                message_id: msg.message_id,
                conversation_id: msg.conversation_id,
                user_name: msg.user_name.unwrap_or_else(|| "Unknown".to_string()),
                model: priced.model.unwrap_or_else(|| "unknown".to_string()),
                sender,
                text: msg.text.unwrap_or_default(),
                token_count: priced.tokens,
                cost: priced.cost,
                resolution: priced.resolution,
                is_user_authored: msg.is_user_authored,
                created_at: msg.created_at,
            })
        }
    });
    let documents = try_join_all(tasks).await?;

    Ok(Json(Paginated {
        documents,
        pagination,
        time_period: None,
    }))
}
