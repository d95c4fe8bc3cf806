use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use nivonix_persist::{Message, ThreadSummary};

use crate::{error::ApiResult, extract::AuthUser, state::AppState};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub thread_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TurnResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummaryResponse {
    pub thread_id: String,
    pub title: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub role: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Run one conversation turn
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = TurnRequest,
    responses(
        (status = 200, description = "Assistant reply", body = TurnResponse),
        (status = 400, description = "Missing thread id or message"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 502, description = "Reply generation failed")
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<TurnRequest>,
) -> ApiResult<Json<TurnResponse>> {
    let reply = state
        .chat
        .run_turn(&user_id, &req.thread_id, &req.message)
        .await?;

    Ok(Json(TurnResponse { reply }))
}

/// List the caller's threads, newest first
#[utoipa::path(
    get,
    path = "/api/chat/thread",
    responses(
        (status = 200, description = "Thread summaries", body = [ThreadSummaryResponse]),
        (status = 401, description = "Missing or invalid credential")
    ),
    tag = "chat"
)]
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<ThreadSummaryResponse>>> {
    let summaries = state.store.list(&user_id).await?;

    Ok(Json(summaries.into_iter().map(summary_response).collect()))
}

/// Fetch one thread's messages in order
#[utoipa::path(
    get,
    path = "/api/chat/thread/{thread_id}",
    params(
        ("thread_id" = String, Path, description = "Client-chosen thread identifier")
    ),
    responses(
        (status = 200, description = "Ordered messages", body = [MessageResponse]),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "No such thread for this owner")
    ),
    tag = "chat"
)]
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let messages = state.store.fetch_messages(&user_id, &thread_id).await?;

    Ok(Json(messages.into_iter().map(message_response).collect()))
}

/// Delete a thread and all its messages
#[utoipa::path(
    delete,
    path = "/api/chat/thread/{thread_id}",
    params(
        ("thread_id" = String, Path, description = "Client-chosen thread identifier")
    ),
    responses(
        (status = 200, description = "Thread deleted", body = DeleteResponse),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "No such thread for this owner")
    ),
    tag = "chat"
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.store.delete(&user_id, &thread_id).await?;

    Ok(Json(DeleteResponse {
        message: "Thread deleted successfully".to_string(),
    }))
}

fn summary_response(summary: ThreadSummary) -> ThreadSummaryResponse {
    ThreadSummaryResponse {
        thread_id: summary.thread_id,
        title: summary.title,
        updated_at: summary.updated_at,
    }
}

fn message_response(message: Message) -> MessageResponse {
    MessageResponse {
        role: message.role.as_str().to_string(),
        content: message.content,
        timestamp: message.timestamp,
    }
}
