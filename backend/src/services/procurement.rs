//! Procurement service: purchase orders, receipt recording, and the status
//! machine whose `received` transition credits the stock ledger.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{quantity_to_credit, ProcurementStatus};

use crate::error::{AppError, AppResult};
use crate::services::inventory;

/// Procurement service for purchase order lifecycle management
#[derive(Clone)]
pub struct ProcurementService {
    db: PgPool,
}

/// A persisted purchase order header
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Procurement {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub warehouse_id: Uuid,
    pub ordered_by: Uuid,
    pub expected_delivery: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted purchase order line
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProcurementItem {
    pub id: Uuid,
    pub procurement_id: Uuid,
    pub variant_id: Uuid,
    pub quantity_ordered: Decimal,
    pub quantity_received: Decimal,
    pub unit_cost: Decimal,
}

/// A purchase order with its lines
#[derive(Debug, Clone, Serialize)]
pub struct ProcurementWithItems {
    #[serde(flatten)]
    pub procurement: Procurement,
    pub items: Vec<ProcurementItem>,
}

/// Input for creating a purchase order
#[derive(Debug, Deserialize)]
pub struct CreateProcurementInput {
    pub supplier_id: Uuid,
    pub warehouse_id: Uuid,
    pub expected_delivery: Option<NaiveDate>,
    pub items: Vec<ProcurementLineInput>,
}

/// One ordered line
#[derive(Debug, Deserialize)]
pub struct ProcurementLineInput {
    pub variant_id: Uuid,
    pub quantity_ordered: Decimal,
    pub unit_cost: Decimal,
}

/// Input for updating the order status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

/// Input for recording received quantities against order lines
#[derive(Debug, Deserialize)]
pub struct ReceiveItemsInput {
    pub items: Vec<ReceiveLineInput>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiveLineInput {
    pub item_id: Uuid,
    pub quantity_received: Decimal,
}

impl ProcurementService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a purchase order with its lines, status `pending`
    pub async fn create_procurement(
        &self,
        user_id: Uuid,
        input: CreateProcurementInput,
    ) -> AppResult<ProcurementWithItems> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one line item is required".to_string(),
            });
        }
        for line in &input.items {
            if line.quantity_ordered <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Ordered quantity must be positive".to_string(),
                });
            }
            if line.unit_cost < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Unit cost cannot be negative".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        let supplier_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)",
        )
        .bind(input.supplier_id)
        .fetch_one(&mut *tx)
        .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let warehouse_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
        )
        .bind(input.warehouse_id)
        .fetch_one(&mut *tx)
        .await?;
        if !warehouse_exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

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
        }

        let procurement = sqlx::query_as::<_, Procurement>(
            r#"
            INSERT INTO procurements (supplier_id, warehouse_id, ordered_by, expected_delivery, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING id, supplier_id, warehouse_id, ordered_by, expected_delivery, status,
                      created_at, updated_at
            "#,
        )
        .bind(input.supplier_id)
        .bind(input.warehouse_id)
        .bind(user_id)
        .bind(input.expected_delivery)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let item = sqlx::query_as::<_, ProcurementItem>(
                r#"
                INSERT INTO procurement_items (procurement_id, variant_id, quantity_ordered, unit_cost)
                VALUES ($1, $2, $3, $4)
                RETURNING id, procurement_id, variant_id, quantity_ordered, quantity_received, unit_cost
                "#,
            )
            .bind(procurement.id)
            .bind(line.variant_id)
            .bind(line.quantity_ordered)
            .bind(line.unit_cost)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        tx.commit().await?;

        Ok(ProcurementWithItems { procurement, items })
    }

    /// Move an order through its status machine.
    ///
    /// Entering `received` credits the warehouse ledger for each line —
    /// the recorded receipt if one exists, otherwise the full ordered
    /// amount — in the same transaction as the status write.
    pub async fn update_status(
        &self,
        procurement_id: Uuid,
        input: UpdateStatusInput,
    ) -> AppResult<ProcurementWithItems> {
        let next = ProcurementStatus::parse(&input.status).ok_or_else(|| {
            AppError::ValidationError(format!("Unknown procurement status '{}'", input.status))
        })?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, (String, Uuid)>(
            "SELECT status, warehouse_id FROM procurements WHERE id = $1 FOR UPDATE",
        )
        .bind(procurement_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Procurement".to_string()))?;

        let (current_status, warehouse_id) = row;
        let current = ProcurementStatus::parse(&current_status).ok_or_else(|| {
            AppError::Internal(format!("Stored procurement status '{}' is invalid", current_status))
        })?;

        if !current.can_transition_to(next) {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot move procurement from '{}' to '{}'",
                current.as_str(),
                next.as_str()
            )));
        }

        if next == ProcurementStatus::Received {
            let items = sqlx::query_as::<_, (Uuid, Decimal, Decimal)>(
                "SELECT variant_id, quantity_ordered, quantity_received FROM procurement_items WHERE procurement_id = $1",
            )
            .bind(procurement_id)
            .fetch_all(&mut *tx)
            .await?;

            for (variant_id, quantity_ordered, quantity_received) in items {
                let credit = quantity_to_credit(quantity_ordered, quantity_received);
                if credit > Decimal::ZERO {
                    inventory::adjust_level(&mut *tx, warehouse_id, variant_id, credit).await?;
                }
            }
        }

        sqlx::query("UPDATE procurements SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(next.as_str())
            .bind(procurement_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%procurement_id, status = next.as_str(), "Procurement status updated");

        self.get_procurement(procurement_id).await
    }

    /// Record received quantities against order lines.
    ///
    /// This never touches the ledger or the status; crediting happens only
    /// at the `received` transition.
    pub async fn receive_items(
        &self,
        procurement_id: Uuid,
        input: ReceiveItemsInput,
    ) -> AppResult<ProcurementWithItems> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one receipt line is required".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM procurements WHERE id = $1 FOR UPDATE",
        )
        .bind(procurement_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Procurement".to_string()))?;

        let current = ProcurementStatus::parse(&status).ok_or_else(|| {
            AppError::Internal(format!("Stored procurement status '{}' is invalid", status))
        })?;
        if current.is_terminal() {
            return Err(AppError::InvalidStateTransition(format!(
                "Cannot record receipts on a '{}' procurement",
                current.as_str()
            )));
        }

        for line in &input.items {
            if line.quantity_received < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Received quantity cannot be negative".to_string(),
                });
            }

            let quantity_ordered = sqlx::query_scalar::<_, Decimal>(
                "SELECT quantity_ordered FROM procurement_items WHERE id = $1 AND procurement_id = $2",
            )
            .bind(line.item_id)
            .bind(procurement_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Procurement item".to_string()))?;

            if line.quantity_received > quantity_ordered {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: format!(
                        "Received quantity {} exceeds ordered quantity {}",
                        line.quantity_received, quantity_ordered
                    ),
                });
            }

            sqlx::query("UPDATE procurement_items SET quantity_received = $1 WHERE id = $2")
                .bind(line.quantity_received)
                .bind(line.item_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_procurement(procurement_id).await
    }

    /// List purchase orders, newest first
    pub async fn list_procurements(&self) -> AppResult<Vec<Procurement>> {
        let procurements = sqlx::query_as::<_, Procurement>(
            r#"
            SELECT id, supplier_id, warehouse_id, ordered_by, expected_delivery, status,
                   created_at, updated_at
            FROM procurements
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(procurements)
    }

    /// Get a purchase order with its lines
    pub async fn get_procurement(&self, procurement_id: Uuid) -> AppResult<ProcurementWithItems> {
        let procurement = sqlx::query_as::<_, Procurement>(
            r#"
            SELECT id, supplier_id, warehouse_id, ordered_by, expected_delivery, status,
                   created_at, updated_at
            FROM procurements
            WHERE id = $1
            "#,
        )
        .bind(procurement_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Procurement".to_string()))?;

        let items = sqlx::query_as::<_, ProcurementItem>(
            r#"
            SELECT id, procurement_id, variant_id, quantity_ordered, quantity_received, unit_cost
            FROM procurement_items
            WHERE procurement_id = $1
            ORDER BY id
            "#,
        )
        .bind(procurement_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProcurementWithItems { procurement, items })
    }
}
