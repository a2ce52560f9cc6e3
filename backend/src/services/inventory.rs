//! Stock ledger service: the single source of truth for quantity on hand
//! per (warehouse, variant) pair.
//!
//! The ledger functions are generic over the executor so the sale,
//! procurement, collection, and transfer processors can call them inside
//! their own transactions. The ledger itself never enforces non-negativity;
//! callers run the insufficient-stock check under a locking read first, and
//! the database check constraint turns any missed race into a hard failure
//! instead of negative stock.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Read the current quantity for a ledger row.
///
/// Absence of a row reads as zero, not as an error.
pub async fn get_level<'e, E>(executor: E, warehouse_id: Uuid, variant_id: Uuid) -> AppResult<Decimal>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let quantity = sqlx::query_scalar::<_, Decimal>(
        "SELECT quantity FROM inventory_levels WHERE warehouse_id = $1 AND variant_id = $2",
    )
    .bind(warehouse_id)
    .bind(variant_id)
    .fetch_optional(executor)
    .await?;

    Ok(quantity.unwrap_or(Decimal::ZERO))
}

/// Read the current quantity while holding the row lock until the enclosing
/// transaction ends, so a concurrent writer on the same (warehouse, variant)
/// pair blocks until this check-then-adjust sequence commits.
pub async fn get_level_for_update(
    tx: &mut Transaction<'_, Postgres>,
    warehouse_id: Uuid,
    variant_id: Uuid,
) -> AppResult<Decimal> {
    let quantity = sqlx::query_scalar::<_, Decimal>(
        "SELECT quantity FROM inventory_levels WHERE warehouse_id = $1 AND variant_id = $2 FOR UPDATE",
    )
    .bind(warehouse_id)
    .bind(variant_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(quantity.unwrap_or(Decimal::ZERO))
}

/// Additively adjust a ledger row, creating it at the delta when absent.
///
/// The adjustment happens in a single atomic statement rather than
/// read-modify-write in application code, so concurrent adjustments to the
/// same key cannot lose updates. Returns the new quantity.
pub async fn adjust_level<'e, E>(
    executor: E,
    warehouse_id: Uuid,
    variant_id: Uuid,
    delta: Decimal,
) -> AppResult<Decimal>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let quantity = sqlx::query_scalar::<_, Decimal>(
        r#"
        INSERT INTO inventory_levels (warehouse_id, variant_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (warehouse_id, variant_id)
        DO UPDATE SET quantity = inventory_levels.quantity + EXCLUDED.quantity,
                      updated_at = NOW()
        RETURNING quantity
        "#,
    )
    .bind(warehouse_id)
    .bind(variant_id)
    .bind(delta)
    .fetch_one(executor)
    .await?;

    Ok(quantity)
}

/// A ledger row joined with its variant for reporting
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryLevelRow {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub variant_id: Uuid,
    pub variant_name: String,
    pub sku: String,
    pub unit: String,
    pub quantity: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Read-side inventory service for reporting endpoints
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

impl InventoryService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List ledger rows for a warehouse
    pub async fn list_levels(&self, warehouse_id: Uuid) -> AppResult<Vec<InventoryLevelRow>> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
        )
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        let levels = sqlx::query_as::<_, InventoryLevelRow>(
            r#"
            SELECT il.id, il.warehouse_id, il.variant_id, pv.name AS variant_name, pv.sku,
                   pv.unit, il.quantity, il.batch_number, il.expiry_date, il.updated_at
            FROM inventory_levels il
            JOIN product_variants pv ON pv.id = il.variant_id
            WHERE il.warehouse_id = $1
            ORDER BY pv.name, pv.sku
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(levels)
    }

    /// Quantity on hand for a single (warehouse, variant) pair
    pub async fn get_warehouse_level(
        &self,
        warehouse_id: Uuid,
        variant_id: Uuid,
    ) -> AppResult<Decimal> {
        get_level(&self.db, warehouse_id, variant_id).await
    }

    /// Ledger rows at or below the given quantity threshold, across all
    /// warehouses
    pub async fn low_stock(&self, threshold: Decimal) -> AppResult<Vec<InventoryLevelRow>> {
        if threshold < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "threshold".to_string(),
                message: "Threshold cannot be negative".to_string(),
            });
        }

        let levels = sqlx::query_as::<_, InventoryLevelRow>(
            r#"
            SELECT il.id, il.warehouse_id, il.variant_id, pv.name AS variant_name, pv.sku,
                   pv.unit, il.quantity, il.batch_number, il.expiry_date, il.updated_at
            FROM inventory_levels il
            JOIN product_variants pv ON pv.id = il.variant_id
            WHERE il.quantity <= $1
            ORDER BY il.quantity
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.db)
        .await?;

        Ok(levels)
    }
}
