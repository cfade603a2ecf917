use axum::Json;
use parley::{
    Activity, ActivitySet, ActivityType, ChannelAccount, ConversationAccount, ResourceResponse,
    Role,
};
use utoipa::OpenApi;

use crate::routes::{activities, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        activities::post_activity,
        activities::get_activities,
        activities::reset_state,
    ),
    components(schemas(
        Activity,
        ActivityType,
        ChannelAccount,
        ConversationAccount,
        Role,
        ActivitySet,
        ResourceResponse,
        health::StatusResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "activities", description = "Activity ingest and watermark polling"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
