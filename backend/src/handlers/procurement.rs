//! HTTP handlers for procurement endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::procurement::{
    CreateProcurementInput, Procurement, ProcurementService, ProcurementWithItems,
    ReceiveItemsInput, UpdateStatusInput,
};
use crate::AppState;

/// Create a purchase order
pub async fn create_procurement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProcurementInput>,
) -> AppResult<Json<ApiResponse<ProcurementWithItems>>> {
    if !current_user.0.has_permission("procurements", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProcurementService::new(state.db);
    let procurement = service
        .create_procurement(current_user.0.user_id, input)
        .await?;
    Ok(Json(ApiResponse::ok(procurement)))
}

/// List purchase orders
pub async fn list_procurements(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Procurement>>>> {
    if !current_user.0.has_permission("procurements", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProcurementService::new(state.db);
    let procurements = service.list_procurements().await?;
    Ok(Json(ApiResponse::ok(procurements)))
}

/// Get a purchase order with its lines
pub async fn get_procurement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(procurement_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProcurementWithItems>>> {
    if !current_user.0.has_permission("procurements", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProcurementService::new(state.db);
    let procurement = service.get_procurement(procurement_id).await?;
    Ok(Json(ApiResponse::ok(procurement)))
}

/// Update a purchase order's status
pub async fn update_procurement_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(procurement_id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<ApiResponse<ProcurementWithItems>>> {
    if !current_user.0.has_permission("procurements", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProcurementService::new(state.db);
    let procurement = service.update_status(procurement_id, input).await?;
    Ok(Json(ApiResponse::ok(procurement)))
}

/// Record received quantities against order lines
pub async fn receive_procurement_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(procurement_id): Path<Uuid>,
    Json(input): Json<ReceiveItemsInput>,
) -> AppResult<Json<ApiResponse<ProcurementWithItems>>> {
    if !current_user.0.has_permission("procurements", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProcurementService::new(state.db);
    let procurement = service.receive_items(procurement_id, input).await?;
    Ok(Json(ApiResponse::ok(procurement)))
}
