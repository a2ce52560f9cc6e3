//! HTTP handlers for inventory reporting endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{InventoryLevelRow, InventoryService};
use crate::AppState;

/// Query parameters for the low-stock report
#[derive(Debug, Deserialize)]
pub struct LowStockQuery {
    pub threshold: Option<Decimal>,
}

/// List ledger rows for a warehouse
pub async fn list_levels(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(warehouse_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLevelRow>>>> {
    let service = InventoryService::new(state.db);
    let levels = service.list_levels(warehouse_id).await?;
    Ok(Json(ApiResponse::ok(levels)))
}

/// Quantity on hand for one (warehouse, variant) pair
pub async fn get_level(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path((warehouse_id, variant_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<Decimal>>> {
    let service = InventoryService::new(state.db);
    let quantity = service.get_warehouse_level(warehouse_id, variant_id).await?;
    Ok(Json(ApiResponse::ok(quantity)))
}

/// Ledger rows at or below a quantity threshold
pub async fn low_stock(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLevelRow>>>> {
    let threshold = query.threshold.unwrap_or_else(|| Decimal::from(10));
    let service = InventoryService::new(state.db);
    let levels = service.low_stock(threshold).await?;
    Ok(Json(ApiResponse::ok(levels)))
}
