//! HTTP handlers for supplier management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::supplier::{
    CreateSupplierInput, Supplier, SupplierService, UpdateSupplierInput,
};
use crate::AppState;

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    if !current_user.0.has_permission("suppliers", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = SupplierService::new(state.db);
    let supplier = service.create_supplier(input).await?;
    Ok(Json(ApiResponse::ok(supplier)))
}

/// List suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Supplier>>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service.list_suppliers().await?;
    Ok(Json(ApiResponse::ok(suppliers)))
}

/// Get a supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get_supplier(supplier_id).await?;
    Ok(Json(ApiResponse::ok(supplier)))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<ApiResponse<Supplier>>> {
    if !current_user.0.has_permission("suppliers", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = SupplierService::new(state.db);
    let supplier = service.update_supplier(supplier_id, input).await?;
    Ok(Json(ApiResponse::ok(supplier)))
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !current_user.0.has_permission("suppliers", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = SupplierService::new(state.db);
    service.delete_supplier(supplier_id).await?;
    Ok(Json(ApiResponse::ok(())))
}
