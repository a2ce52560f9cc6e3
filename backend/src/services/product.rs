//! Product catalog service: categories, families, and SKU variants.
//!
//! Variant creation enforces the base-unit invariant: at most one variant
//! per family may carry a conversion factor of exactly 1, so unit
//! resolution during sales is never ambiguous.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{validate_conversion_factor, validate_sku};

use crate::error::{AppError, AppResult};

/// Product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// A top-level product category
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A family of variants interchangeable by unit conversion
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductFamily {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A sellable/stockable SKU
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductVariant {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub sku: String,
    pub barcode: Option<String>,
    pub unit: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub is_manufactured: bool,
    pub conversion_factor: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryInput {
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating a product family
#[derive(Debug, Deserialize)]
pub struct CreateFamilyInput {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Input for creating a product variant
#[derive(Debug, Deserialize)]
pub struct CreateVariantInput {
    pub family_id: Uuid,
    pub name: String,
    pub sku: String,
    pub barcode: Option<String>,
    pub unit: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    #[serde(default)]
    pub is_manufactured: bool,
    /// Defaults to 1 (the variant is its own base unit)
    pub conversion_factor: Option<Decimal>,
}

/// Input for updating a product variant
#[derive(Debug, Deserialize)]
pub struct UpdateVariantInput {
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub unit: Option<String>,
    pub cost_price: Option<Decimal>,
    pub selling_price: Option<Decimal>,
    pub is_manufactured: Option<bool>,
    pub conversion_factor: Option<Decimal>,
}

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Create a category
    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<Category> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Category name cannot be empty".to_string(),
            });
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(category)
    }

    /// List categories
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(categories)
    }

    // ------------------------------------------------------------------
    // Families
    // ------------------------------------------------------------------

    /// Create a product family
    pub async fn create_family(&self, input: CreateFamilyInput) -> AppResult<ProductFamily> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Family name cannot be empty".to_string(),
            });
        }

        let category_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)",
        )
        .bind(input.category_id)
        .fetch_one(&self.db)
        .await?;
        if !category_exists {
            return Err(AppError::NotFound("Category".to_string()));
        }

        let family = sqlx::query_as::<_, ProductFamily>(
            r#"
            INSERT INTO product_families (category_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, category_id, name, description, created_at
            "#,
        )
        .bind(input.category_id)
        .bind(input.name.trim())
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(family)
    }

    /// List product families
    pub async fn list_families(&self) -> AppResult<Vec<ProductFamily>> {
        let families = sqlx::query_as::<_, ProductFamily>(
            "SELECT id, category_id, name, description, created_at FROM product_families ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(families)
    }

    /// List variants belonging to a family, in resolution order
    pub async fn list_family_variants(&self, family_id: Uuid) -> AppResult<Vec<ProductVariant>> {
        let family_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_families WHERE id = $1)",
        )
        .bind(family_id)
        .fetch_one(&self.db)
        .await?;
        if !family_exists {
            return Err(AppError::NotFound("Product family".to_string()));
        }

        let variants = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, family_id, name, sku, barcode, unit, cost_price, selling_price,
                   is_manufactured, conversion_factor, created_at, updated_at
            FROM product_variants
            WHERE family_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(family_id)
        .fetch_all(&self.db)
        .await?;

        Ok(variants)
    }

    // ------------------------------------------------------------------
    // Variants
    // ------------------------------------------------------------------

    /// Create a product variant
    pub async fn create_variant(&self, input: CreateVariantInput) -> AppResult<ProductVariant> {
        validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        let conversion_factor = input.conversion_factor.unwrap_or(Decimal::ONE);
        validate_conversion_factor(conversion_factor).map_err(|msg| AppError::Validation {
            field: "conversion_factor".to_string(),
            message: msg.to_string(),
        })?;

        if input.cost_price < Decimal::ZERO || input.selling_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: "Prices cannot be negative".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let family_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_families WHERE id = $1)",
        )
        .bind(input.family_id)
        .fetch_one(&mut *tx)
        .await?;
        if !family_exists {
            return Err(AppError::NotFound("Product family".to_string()));
        }

        let sku_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_variants WHERE sku = $1)",
        )
        .bind(&input.sku)
        .fetch_one(&mut *tx)
        .await?;
        if sku_taken {
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }

        if let Some(ref barcode) = input.barcode {
            let barcode_taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM product_variants WHERE barcode = $1)",
            )
            .bind(barcode)
            .fetch_one(&mut *tx)
            .await?;
            if barcode_taken {
                return Err(AppError::DuplicateEntry("barcode".to_string()));
            }
        }

        // One base unit per family: a second factor-1 variant would make
        // unit resolution ambiguous.
        if conversion_factor == Decimal::ONE {
            let base_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM product_variants WHERE family_id = $1 AND conversion_factor = 1)",
            )
            .bind(input.family_id)
            .fetch_one(&mut *tx)
            .await?;
            if base_exists {
                return Err(AppError::Validation {
                    field: "conversion_factor".to_string(),
                    message: "Family already has a base-unit variant".to_string(),
                });
            }
        }

        let variant = sqlx::query_as::<_, ProductVariant>(
            r#"
            INSERT INTO product_variants (family_id, name, sku, barcode, unit, cost_price,
                                          selling_price, is_manufactured, conversion_factor)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, family_id, name, sku, barcode, unit, cost_price, selling_price,
                      is_manufactured, conversion_factor, created_at, updated_at
            "#,
        )
        .bind(input.family_id)
        .bind(input.name.trim())
        .bind(&input.sku)
        .bind(&input.barcode)
        .bind(&input.unit)
        .bind(input.cost_price)
        .bind(input.selling_price)
        .bind(input.is_manufactured)
        .bind(conversion_factor)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(variant)
    }

    /// List all variants
    pub async fn list_variants(&self) -> AppResult<Vec<ProductVariant>> {
        let variants = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, family_id, name, sku, barcode, unit, cost_price, selling_price,
                   is_manufactured, conversion_factor, created_at, updated_at
            FROM product_variants
            ORDER BY name, sku
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(variants)
    }

    /// Get a variant
    pub async fn get_variant(&self, variant_id: Uuid) -> AppResult<ProductVariant> {
        sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, family_id, name, sku, barcode, unit, cost_price, selling_price,
                   is_manufactured, conversion_factor, created_at, updated_at
            FROM product_variants
            WHERE id = $1
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product variant".to_string()))
    }

    /// Update a variant
    pub async fn update_variant(
        &self,
        variant_id: Uuid,
        input: UpdateVariantInput,
    ) -> AppResult<ProductVariant> {
        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, family_id, name, sku, barcode, unit, cost_price, selling_price,
                   is_manufactured, conversion_factor, created_at, updated_at
            FROM product_variants
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(variant_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product variant".to_string()))?;

        let name = input.name.unwrap_or(existing.name);
        let barcode = input.barcode.or(existing.barcode);
        let unit = input.unit.unwrap_or(existing.unit);
        let cost_price = input.cost_price.unwrap_or(existing.cost_price);
        let selling_price = input.selling_price.unwrap_or(existing.selling_price);
        let is_manufactured = input.is_manufactured.unwrap_or(existing.is_manufactured);
        let conversion_factor = input.conversion_factor.unwrap_or(existing.conversion_factor);

        validate_conversion_factor(conversion_factor).map_err(|msg| AppError::Validation {
            field: "conversion_factor".to_string(),
            message: msg.to_string(),
        })?;
        if cost_price < Decimal::ZERO || selling_price < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: "Prices cannot be negative".to_string(),
            });
        }

        if conversion_factor == Decimal::ONE && existing.conversion_factor != Decimal::ONE {
            let base_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM product_variants WHERE family_id = $1 AND conversion_factor = 1 AND id <> $2)",
            )
            .bind(existing.family_id)
            .bind(variant_id)
            .fetch_one(&mut *tx)
            .await?;
            if base_exists {
                return Err(AppError::Validation {
                    field: "conversion_factor".to_string(),
                    message: "Family already has a base-unit variant".to_string(),
                });
            }
        }

        let variant = sqlx::query_as::<_, ProductVariant>(
            r#"
            UPDATE product_variants
            SET name = $1, barcode = $2, unit = $3, cost_price = $4, selling_price = $5,
                is_manufactured = $6, conversion_factor = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING id, family_id, name, sku, barcode, unit, cost_price, selling_price,
                      is_manufactured, conversion_factor, created_at, updated_at
            "#,
        )
        .bind(&name)
        .bind(&barcode)
        .bind(&unit)
        .bind(cost_price)
        .bind(selling_price)
        .bind(is_manufactured)
        .bind(conversion_factor)
        .bind(variant_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(variant)
    }

    /// Delete a variant
    pub async fn delete_variant(&self, variant_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product_variants WHERE id = $1")
            .bind(variant_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product variant".to_string()));
        }

        Ok(())
    }
}
