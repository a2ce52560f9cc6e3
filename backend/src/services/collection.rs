//! Collection service: records field-agent intake events and credits the
//! warehouse ledger for the collected weight.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::inventory;

/// Collection service for field intake events
#[derive(Clone)]
pub struct CollectionService {
    db: PgPool,
}

/// A persisted collection record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Collection {
    pub id: Uuid,
    pub variant_id: Uuid,
    pub supplier_id: Uuid,
    pub agent_id: Uuid,
    pub warehouse_id: Uuid,
    pub weight: Decimal,
    pub collected_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a collection
#[derive(Debug, Deserialize)]
pub struct RecordCollectionInput {
    pub variant_id: Uuid,
    pub supplier_id: Uuid,
    /// Defaults to the designated default warehouse when unset
    pub warehouse_id: Option<Uuid>,
    pub weight: Decimal,
    pub collected_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl CollectionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a collection and credit the warehouse ledger by the collected
    /// weight, with no unit conversion, in one transaction.
    pub async fn record_collection(
        &self,
        agent_id: Uuid,
        input: RecordCollectionInput,
    ) -> AppResult<Collection> {
        if input.weight <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "weight".to_string(),
                message: "Weight must be positive".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let variant_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_variants WHERE id = $1)",
        )
        .bind(input.variant_id)
        .fetch_one(&mut *tx)
        .await?;
        if !variant_exists {
            return Err(AppError::NotFound("Product variant".to_string()));
        }

        let supplier_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
        )
        .bind(input.supplier_id)
        .fetch_one(&mut *tx)
        .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let warehouse_id = match input.warehouse_id {
            Some(warehouse_id) => {
                let exists = sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
                )
                .bind(warehouse_id)
                .fetch_one(&mut *tx)
                .await?;
                if !exists {
                    return Err(AppError::NotFound("Warehouse".to_string()));
                }
                warehouse_id
            }
            None => sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM warehouses WHERE is_default = TRUE",
            )
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::Configuration("No default warehouse is configured".to_string())
            })?,
        };

        let collected_at = input.collected_at.unwrap_or_else(Utc::now);

        let collection = sqlx::query_as::<_, Collection>(
            r#"
            INSERT INTO collections (variant_id, supplier_id, agent_id, warehouse_id, weight,
                                     collected_at, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, variant_id, supplier_id, agent_id, warehouse_id, weight,
                      collected_at, notes, created_at
            "#,
        )
        .bind(input.variant_id)
        .bind(input.supplier_id)
        .bind(agent_id)
        .bind(warehouse_id)
        .bind(input.weight)
        .bind(collected_at)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        inventory::adjust_level(&mut *tx, warehouse_id, input.variant_id, input.weight).await?;

        tx.commit().await?;

        tracing::info!(collection_id = %collection.id, weight = %collection.weight, "Collection recorded");

        Ok(collection)
    }

    /// List collections, newest first
    pub async fn list_collections(&self, agent_id: Option<Uuid>) -> AppResult<Vec<Collection>> {
        let collections = match agent_id {
            Some(agent_id) => {
                sqlx::query_as::<_, Collection>(
                    r#"
                    SELECT id, variant_id, supplier_id, agent_id, warehouse_id, weight,
                           collected_at, notes, created_at
                    FROM collections
                    WHERE agent_id = $1
                    ORDER BY collected_at DESC
                    "#,
                )
                .bind(agent_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Collection>(
                    r#"
                    SELECT id, variant_id, supplier_id, agent_id, warehouse_id, weight,
                           collected_at, notes, created_at
                    FROM collections
                    ORDER BY collected_at DESC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(collections)
    }
}
