//! Route definitions for the Warehouse POS Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - warehouse management
        .nest("/warehouses", warehouse_routes())
        // Protected routes - supplier management
        .nest("/suppliers", supplier_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - inventory reporting
        .nest("/inventory", inventory_routes())
        // Protected routes - point of sale
        .nest("/sales", sale_routes())
        // Protected routes - procurement
        .nest("/procurements", procurement_routes())
        // Protected routes - field collections
        .nest("/collections", collection_routes())
        // Protected routes - inter-warehouse transfers
        .nest("/transfers", transfer_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Warehouse management routes (protected)
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_warehouses).post(handlers::create_warehouse))
        .route(
            "/:warehouse_id",
            get(handlers::get_warehouse)
                .put(handlers::update_warehouse)
                .delete(handlers::delete_warehouse),
        )
        .route("/:warehouse_id/default", post(handlers::set_default_warehouse))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier management routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        // Categories
        .route("/categories", get(handlers::list_categories).post(handlers::create_category))
        // Families
        .route("/families", get(handlers::list_families).post(handlers::create_family))
        .route("/families/:family_id/variants", get(handlers::list_family_variants))
        // Variants
        .route("/variants", get(handlers::list_variants).post(handlers::create_variant))
        .route(
            "/variants/:variant_id",
            get(handlers::get_variant)
                .put(handlers::update_variant)
                .delete(handlers::delete_variant),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Inventory reporting routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/low-stock", get(handlers::low_stock))
        .route("/warehouses/:warehouse_id", get(handlers::list_levels))
        .route(
            "/warehouses/:warehouse_id/variants/:variant_id",
            get(handlers::get_level),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Point-of-sale routes (protected)
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::process_sale))
        .route("/:sale_id", get(handlers::get_sale))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Procurement routes (protected)
fn procurement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_procurements).post(handlers::create_procurement))
        .route("/:procurement_id", get(handlers::get_procurement))
        .route("/:procurement_id/status", put(handlers::update_procurement_status))
        .route("/:procurement_id/receive", post(handlers::receive_procurement_items))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Field collection routes (protected)
fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_collections).post(handlers::record_collection))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Inter-warehouse transfer routes (protected)
fn transfer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_transfers).post(handlers::create_transfer))
        .route("/:transfer_id", get(handlers::get_transfer))
        .route_layer(middleware::from_fn(auth_middleware))
}
