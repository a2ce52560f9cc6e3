//! HTTP handlers for inter-warehouse transfer endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::transfer::{
    CreateTransferInput, InventoryTransfer, TransferService, TransferWithItems,
};
use crate::AppState;

/// Create a transfer
pub async fn create_transfer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateTransferInput>,
) -> AppResult<Json<ApiResponse<TransferWithItems>>> {
    if !current_user.0.has_permission("transfers", "create") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = TransferService::new(state.db);
    let transfer = service.create_transfer(current_user.0.user_id, input).await?;
    Ok(Json(ApiResponse::ok(transfer)))
}

/// List transfers
pub async fn list_transfers(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<InventoryTransfer>>>> {
    if !current_user.0.has_permission("transfers", "read") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = TransferService::new(state.db);
    let transfers = service.list_transfers().await?;
    Ok(Json(ApiResponse::ok(transfers)))
}

/// Get a transfer with its lines
pub async fn get_transfer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(transfer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TransferWithItems>>> {
    if !current_user.0.has_permission("transfers", "read") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = TransferService::new(state.db);
    let transfer = service.get_transfer(transfer_id).await?;
    Ok(Json(ApiResponse::ok(transfer)))
}
