//! Warehouse management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Warehouse service for stock location management
#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

/// A stock location
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a warehouse
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseInput {
    pub name: String,
    pub location: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Input for updating a warehouse
#[derive(Debug, Deserialize)]
pub struct UpdateWarehouseInput {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl WarehouseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a warehouse. Flagging it as default clears any previous
    /// default in the same transaction.
    pub async fn create_warehouse(&self, input: CreateWarehouseInput) -> AppResult<Warehouse> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Warehouse name cannot be empty".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        if input.is_default {
            sqlx::query("UPDATE warehouses SET is_default = FALSE WHERE is_default = TRUE")
                .execute(&mut *tx)
                .await?;
        }

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (name, location, is_default)
            VALUES ($1, $2, $3)
            RETURNING id, name, location, is_default, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.location)
        .bind(input.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(warehouse)
    }

    /// List warehouses
    pub async fn list_warehouses(&self) -> AppResult<Vec<Warehouse>> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, location, is_default, created_at FROM warehouses ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(warehouses)
    }

    /// Get a warehouse
    pub async fn get_warehouse(&self, warehouse_id: Uuid) -> AppResult<Warehouse> {
        sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, location, is_default, created_at FROM warehouses WHERE id = $1",
        )
        .bind(warehouse_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))
    }

    /// Update a warehouse's name or location
    pub async fn update_warehouse(
        &self,
        warehouse_id: Uuid,
        input: UpdateWarehouseInput,
    ) -> AppResult<Warehouse> {
        let existing = self.get_warehouse(warehouse_id).await?;

        let name = input.name.unwrap_or(existing.name);
        let location = input.location.or(existing.location);

        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Warehouse name cannot be empty".to_string(),
            });
        }

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses
            SET name = $1, location = $2
            WHERE id = $3
            RETURNING id, name, location, is_default, created_at
            "#,
        )
        .bind(name.trim())
        .bind(&location)
        .bind(warehouse_id)
        .fetch_one(&self.db)
        .await?;

        Ok(warehouse)
    }

    /// Designate a warehouse as the default, clearing the previous one
    pub async fn set_default(&self, warehouse_id: Uuid) -> AppResult<Warehouse> {
        let mut tx = self.db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
        )
        .bind(warehouse_id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        sqlx::query("UPDATE warehouses SET is_default = FALSE WHERE is_default = TRUE")
            .execute(&mut *tx)
            .await?;

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses
            SET is_default = TRUE
            WHERE id = $1
            RETURNING id, name, location, is_default, created_at
            "#,
        )
        .bind(warehouse_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(warehouse)
    }

    /// Delete a warehouse
    pub async fn delete_warehouse(&self, warehouse_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = $1")
            .bind(warehouse_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        Ok(())
    }
}
