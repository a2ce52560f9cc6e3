//! HTTP handlers for point-of-sale endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::sale::{CreateSaleInput, Sale, SaleService, SaleWithItems};
use crate::AppState;

/// Query parameters for listing sales
#[derive(Debug, Deserialize)]
pub struct ListSalesQuery {
    pub warehouse_id: Option<Uuid>,
}

/// Process a sale
pub async fn process_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    if !current_user.0.has_permission("sales", "create") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = SaleService::new(state.db);
    let sale = service.process_sale(current_user.0.user_id, input).await?;
    Ok(Json(ApiResponse::ok(sale)))
}

/// List sales
pub async fn list_sales(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListSalesQuery>,
) -> AppResult<Json<ApiResponse<Vec<Sale>>>> {
    if !current_user.0.has_permission("sales", "read") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = SaleService::new(state.db);
    let sales = service.list_sales(query.warehouse_id).await?;
    Ok(Json(ApiResponse::ok(sales)))
}

/// Get a sale with its line items
pub async fn get_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    if !current_user.0.has_permission("sales", "read") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = SaleService::new(state.db);
    let sale = service.get_sale(sale_id).await?;
    Ok(Json(ApiResponse::ok(sale)))
}
