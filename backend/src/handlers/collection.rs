//! HTTP handlers for field-collection endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::collection::{Collection, CollectionService, RecordCollectionInput};
use crate::AppState;

/// Query parameters for listing collections
#[derive(Debug, Deserialize)]
pub struct ListCollectionsQuery {
    pub agent_id: Option<Uuid>,
}

/// Record a field collection
pub async fn record_collection(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordCollectionInput>,
) -> AppResult<Json<ApiResponse<Collection>>> {
    if !current_user.0.has_permission("collections", "create") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = CollectionService::new(state.db);
    let collection = service
        .record_collection(current_user.0.user_id, input)
        .await?;
    Ok(Json(ApiResponse::ok(collection)))
}

/// List collections
pub async fn list_collections(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListCollectionsQuery>,
) -> AppResult<Json<ApiResponse<Vec<Collection>>>> {
    if !current_user.0.has_permission("collections", "read") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = CollectionService::new(state.db);
    let collections = service.list_collections(query.agent_id).await?;
    Ok(Json(ApiResponse::ok(collections)))
}
