use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use parley::{Activity, ActivitySet, ResourceResponse};
use crate::{error::{ApiError, ApiResult}, state::AppState};

#[derive(Debug, Deserialize)]
pub struct PollQuery {
    /// Number of activities the client has already seen
    #[serde(default)]
    pub watermark: u64,
}

/// Ingest one activity from the channel
///
/// Replies are never returned here; they are buffered and delivered by polling.
#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = Activity,
    responses(
        (status = 200, description = "Activity accepted", body = ResourceResponse),
        (status = 400, description = "Missing conversation id or malformed payload")
    ),
    tag = "activities"
)]
pub async fn post_activity(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Activity>, JsonRejection>,
) -> ApiResult<Json<ResourceResponse>> {
    let Json(activity) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let ack = state.handler.handle_incoming(activity).await?;

    Ok(Json(ack))
}

/// Fetch buffered activities from a watermark on
#[utoipa::path(
    get,
    path = "/api/conversations/{conversation_id}/activities",
    params(
        ("conversation_id" = String, Path, description = "Conversation ID"),
        ("watermark" = Option<u64>, Query, description = "Activities already seen (default: 0)")
    ),
    responses(
        (status = 200, description = "Activities after the watermark and the current watermark", body = ActivitySet),
        (status = 400, description = "Invalid watermark")
    ),
    tag = "activities"
)]
pub async fn get_activities(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
    query: Result<Query<PollQuery>, QueryRejection>,
) -> ApiResult<Json<ActivitySet>> {
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let set = state
        .handler
        .handle_poll(&conversation_id, query.watermark)
        .await?;

    Ok(Json(set))
}

/// Forget the conversation's selected topic
#[utoipa::path(
    delete,
    path = "/api/conversations/{conversation_id}/state",
    params(
        ("conversation_id" = String, Path, description = "Conversation ID")
    ),
    responses(
        (status = 204, description = "State cleared")
    ),
    tag = "activities"
)]
pub async fn reset_state(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.handler.reset_conversation(&conversation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
