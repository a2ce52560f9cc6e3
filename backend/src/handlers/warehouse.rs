//! HTTP handlers for warehouse management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::warehouse::{
    CreateWarehouseInput, UpdateWarehouseInput, Warehouse, WarehouseService,
};
use crate::AppState;

/// Create a warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateWarehouseInput>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    if !current_user.0.has_permission("warehouses", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = WarehouseService::new(state.db);
    let warehouse = service.create_warehouse(input).await?;
    Ok(Json(ApiResponse::ok(warehouse)))
}

/// List warehouses
pub async fn list_warehouses(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Warehouse>>>> {
    let service = WarehouseService::new(state.db);
    let warehouses = service.list_warehouses().await?;
    Ok(Json(ApiResponse::ok(warehouses)))
}

/// Get a warehouse
pub async fn get_warehouse(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    let service = WarehouseService::new(state.db);
    let warehouse = service.get_warehouse(warehouse_id).await?;
    Ok(Json(ApiResponse::ok(warehouse)))
}

/// Update a warehouse
pub async fn update_warehouse(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(warehouse_id): Path<Uuid>,
    Json(input): Json<UpdateWarehouseInput>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    if !current_user.0.has_permission("warehouses", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = WarehouseService::new(state.db);
    let warehouse = service.update_warehouse(warehouse_id, input).await?;
    Ok(Json(ApiResponse::ok(warehouse)))
}

/// Designate a warehouse as the default
pub async fn set_default_warehouse(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Warehouse>>> {
    if !current_user.0.has_permission("warehouses", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = WarehouseService::new(state.db);
    let warehouse = service.set_default(warehouse_id).await?;
    Ok(Json(ApiResponse::ok(warehouse)))
}

/// Delete a warehouse
pub async fn delete_warehouse(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !current_user.0.has_permission("warehouses", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = WarehouseService::new(state.db);
    service.delete_warehouse(warehouse_id).await?;
    Ok(Json(ApiResponse::ok(())))
}
