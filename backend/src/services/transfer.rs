//! Transfer service: moves stock between warehouses, decrementing the source
//! ledger and crediting the destination atomically.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::TransferStatus;

use crate::error::{AppError, AppResult};
use crate::services::inventory;

/// Transfer service for inter-warehouse stock movements
#[derive(Clone)]
pub struct TransferService {
    db: PgPool,
}

/// A persisted transfer header
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryTransfer {
    pub id: Uuid,
    pub source_warehouse_id: Uuid,
    pub destination_warehouse_id: Uuid,
    pub authorized_by: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted transfer line
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransferItem {
    pub id: Uuid,
    pub transfer_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: Decimal,
}

/// A transfer with its lines
#[derive(Debug, Clone, Serialize)]
pub struct TransferWithItems {
    #[serde(flatten)]
    pub transfer: InventoryTransfer,
    pub items: Vec<TransferItem>,
}

/// Input for creating a transfer
#[derive(Debug, Deserialize)]
pub struct CreateTransferInput {
    pub source_warehouse_id: Uuid,
    pub destination_warehouse_id: Uuid,
    pub items: Vec<TransferLineInput>,
}

#[derive(Debug, Deserialize)]
pub struct TransferLineInput {
    pub variant_id: Uuid,
    pub quantity: Decimal,
}

impl TransferService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Move stock between two warehouses. Every line is checked against the
    /// source ledger under a locking read; insufficient stock on any line
    /// fails the whole transfer with neither warehouse changed.
    pub async fn create_transfer(
        &self,
        user_id: Uuid,
        input: CreateTransferInput,
    ) -> AppResult<TransferWithItems> {
        if input.source_warehouse_id == input.destination_warehouse_id {
            return Err(AppError::SameWarehouse);
        }
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one line item is required".to_string(),
            });
        }
        for line in &input.items {
            if line.quantity <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Line quantity must be positive".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        for (warehouse_id, label) in [
            (input.source_warehouse_id, "Source warehouse"),
            (input.destination_warehouse_id, "Destination warehouse"),
        ] {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
            )
            .bind(warehouse_id)
            .fetch_one(&mut *tx)
            .await?;
            if !exists {
                return Err(AppError::NotFound(label.to_string()));
            }
        }

        let transfer = sqlx::query_as::<_, InventoryTransfer>(
            r#"
            INSERT INTO inventory_transfers (source_warehouse_id, destination_warehouse_id,
                                             authorized_by, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, source_warehouse_id, destination_warehouse_id, authorized_by,
                      status, created_at
            "#,
        )
        .bind(input.source_warehouse_id)
        .bind(input.destination_warehouse_id)
        .bind(user_id)
        .bind(TransferStatus::Completed.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let variant_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM product_variants WHERE id = $1)",
            )
            .bind(line.variant_id)
            .fetch_one(&mut *tx)
            .await?;
            if !variant_exists {
                return Err(AppError::NotFound("Product variant".to_string()));
            }

            let on_hand = inventory::get_level_for_update(
                &mut tx,
                input.source_warehouse_id,
                line.variant_id,
            )
            .await?;
            if on_hand < line.quantity {
                return Err(AppError::InsufficientStock(format!(
                    "variant {}: requested {}, on hand {}",
                    line.variant_id, line.quantity, on_hand
                )));
            }

            inventory::adjust_level(
                &mut *tx,
                input.source_warehouse_id,
                line.variant_id,
                -line.quantity,
            )
            .await?;
            inventory::adjust_level(
                &mut *tx,
                input.destination_warehouse_id,
                line.variant_id,
                line.quantity,
            )
            .await?;

            let item = sqlx::query_as::<_, TransferItem>(
                r#"
                INSERT INTO inventory_transfer_items (transfer_id, variant_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING id, transfer_id, variant_id, quantity
                "#,
            )
            .bind(transfer.id)
            .bind(line.variant_id)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        tx.commit().await?;

        tracing::info!(transfer_id = %transfer.id, "Transfer completed");

        Ok(TransferWithItems { transfer, items })
    }

    /// List transfers, newest first
    pub async fn list_transfers(&self) -> AppResult<Vec<InventoryTransfer>> {
        let transfers = sqlx::query_as::<_, InventoryTransfer>(
            r#"
            SELECT id, source_warehouse_id, destination_warehouse_id, authorized_by,
                   status, created_at
            FROM inventory_transfers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(transfers)
    }

    /// Get a transfer with its lines
    pub async fn get_transfer(&self, transfer_id: Uuid) -> AppResult<TransferWithItems> {
        let transfer = sqlx::query_as::<_, InventoryTransfer>(
            r#"
            SELECT id, source_warehouse_id, destination_warehouse_id, authorized_by,
                   status, created_at
            FROM inventory_transfers
            WHERE id = $1
            "#,
        )
        .bind(transfer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transfer".to_string()))?;

        let items = sqlx::query_as::<_, TransferItem>(
            r#"
            SELECT id, transfer_id, variant_id, quantity
            FROM inventory_transfer_items
            WHERE transfer_id = $1
            ORDER BY id
            "#,
        )
        .bind(transfer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(TransferWithItems { transfer, items })
    }
}
