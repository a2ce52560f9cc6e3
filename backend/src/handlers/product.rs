//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::ApiResponse;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::product::{
    Category, CreateCategoryInput, CreateFamilyInput, CreateVariantInput, ProductFamily,
    ProductService, ProductVariant, UpdateVariantInput,
};
use crate::AppState;

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<Json<ApiResponse<Category>>> {
    if !current_user.0.has_permission("products", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProductService::new(state.db);
    let category = service.create_category(input).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// List categories
pub async fn list_categories(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let service = ProductService::new(state.db);
    let categories = service.list_categories().await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// Create a product family
pub async fn create_family(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateFamilyInput>,
) -> AppResult<Json<ApiResponse<ProductFamily>>> {
    if !current_user.0.has_permission("products", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProductService::new(state.db);
    let family = service.create_family(input).await?;
    Ok(Json(ApiResponse::ok(family)))
}

/// List product families
pub async fn list_families(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ProductFamily>>>> {
    let service = ProductService::new(state.db);
    let families = service.list_families().await?;
    Ok(Json(ApiResponse::ok(families)))
}

/// List the variants of a family
pub async fn list_family_variants(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(family_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<ProductVariant>>>> {
    let service = ProductService::new(state.db);
    let variants = service.list_family_variants(family_id).await?;
    Ok(Json(ApiResponse::ok(variants)))
}

/// Create a product variant
pub async fn create_variant(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateVariantInput>,
) -> AppResult<Json<ApiResponse<ProductVariant>>> {
    if !current_user.0.has_permission("products", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProductService::new(state.db);
    let variant = service.create_variant(input).await?;
    Ok(Json(ApiResponse::ok(variant)))
}

/// List all product variants
pub async fn list_variants(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ProductVariant>>>> {
    let service = ProductService::new(state.db);
    let variants = service.list_variants().await?;
    Ok(Json(ApiResponse::ok(variants)))
}

/// Get a product variant
pub async fn get_variant(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(variant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductVariant>>> {
    let service = ProductService::new(state.db);
    let variant = service.get_variant(variant_id).await?;
    Ok(Json(ApiResponse::ok(variant)))
}

/// Update a product variant
pub async fn update_variant(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(variant_id): Path<Uuid>,
    Json(input): Json<UpdateVariantInput>,
) -> AppResult<Json<ApiResponse<ProductVariant>>> {
    if !current_user.0.has_permission("products", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProductService::new(state.db);
    let variant = service.update_variant(variant_id, input).await?;
    Ok(Json(ApiResponse::ok(variant)))
}

/// Delete a product variant
pub async fn delete_variant(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(variant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !current_user.0.has_permission("products", "manage") {
        return Err(AppError::InsufficientPermissions);
    }
    let service = ProductService::new(state.db);
    service.delete_variant(variant_id).await?;
    Ok(Json(ApiResponse::ok(())))
}
