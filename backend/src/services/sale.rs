//! Point-of-sale service: processes carts into sale records and ledger
//! decrements as one unit of work.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{compute_sale_totals, resolve_base_quantity, PaymentMethod, VariantUnit};

use crate::error::{AppError, AppResult};
use crate::services::inventory;

/// Sale service for processing and querying point-of-sale transactions
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// A persisted sale header
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub customer_name: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub payment_method: String,
    pub processed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A persisted sale line item
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A sale with its line items
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

/// Input for processing a sale
#[derive(Debug, Deserialize)]
pub struct CreateSaleInput {
    pub warehouse_id: Uuid,
    pub customer_name: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    pub items: Vec<SaleLineInput>,
}

/// One requested cart line, in the variant's own unit
#[derive(Debug, Deserialize)]
pub struct SaleLineInput {
    pub variant_id: Uuid,
    pub quantity: Decimal,
    /// Defaults to the variant's selling price when omitted
    pub unit_price: Option<Decimal>,
}

/// A cart line priced and ready to persist
struct PricedLine {
    variant_id: Uuid,
    quantity: Decimal,
    unit_price: Decimal,
    line_total: Decimal,
}

impl SaleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Process a sale: validate the warehouse, resolve every line to its
    /// family's base unit, check stock for all lines, then persist the sale
    /// and apply the ledger decrements — all in one transaction. Any failure
    /// leaves no sale row and no ledger change.
    pub async fn process_sale(&self, user_id: Uuid, input: CreateSaleInput) -> AppResult<SaleWithItems> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one line item is required".to_string(),
            });
        }
        if input.tax < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "tax".to_string(),
                message: "Tax cannot be negative".to_string(),
            });
        }
        if input.discount < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "discount".to_string(),
                message: "Discount cannot be negative".to_string(),
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

        let warehouse_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)",
        )
        .bind(input.warehouse_id)
        .fetch_one(&mut *tx)
        .await?;

        if !warehouse_exists {
            return Err(AppError::NotFound("Warehouse".to_string()));
        }

        // Resolve every line to its family's base unit. Lines resolving to
        // the same base variant are summed before the stock check.
        let mut priced: Vec<PricedLine> = Vec::with_capacity(input.items.len());
        let mut deductions: BTreeMap<Uuid, Decimal> = BTreeMap::new();

        for line in &input.items {
            let variant = sqlx::query_as::<_, (Uuid, Uuid, Decimal, Decimal)>(
                "SELECT id, family_id, conversion_factor, selling_price FROM product_variants WHERE id = $1",
            )
            .bind(line.variant_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product variant".to_string()))?;

            let (variant_id, family_id, conversion_factor, selling_price) = variant;

            let family_variants = sqlx::query_as::<_, (Uuid, Decimal)>(
                "SELECT id, conversion_factor FROM product_variants WHERE family_id = $1 ORDER BY created_at, id",
            )
            .bind(family_id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(|(id, factor)| VariantUnit::new(id, factor))
            .collect::<Vec<_>>();

            let unit = VariantUnit::new(variant_id, conversion_factor);
            let (base_variant_id, base_qty) =
                resolve_base_quantity(&unit, &family_variants, line.quantity).map_err(|e| {
                    AppError::Validation {
                        field: "items".to_string(),
                        message: e.to_string(),
                    }
                })?;

            *deductions.entry(base_variant_id).or_insert(Decimal::ZERO) += base_qty;

            let unit_price = line.unit_price.unwrap_or(selling_price);
            if unit_price < Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "items".to_string(),
                    message: "Unit price cannot be negative".to_string(),
                });
            }

            priced.push(PricedLine {
                variant_id: line.variant_id,
                quantity: line.quantity,
                unit_price,
                line_total: line.quantity * unit_price,
            });
        }

        // All lines must pass the stock check before any mutation. The
        // locking read serializes concurrent sellers on the same row.
        for (base_variant_id, deduct_qty) in &deductions {
            let on_hand =
                inventory::get_level_for_update(&mut tx, input.warehouse_id, *base_variant_id).await?;
            if on_hand < *deduct_qty {
                return Err(AppError::InsufficientStock(format!(
                    "variant {}: requested {}, on hand {}",
                    base_variant_id, deduct_qty, on_hand
                )));
            }
        }

        let line_amounts: Vec<(Decimal, Decimal)> =
            priced.iter().map(|l| (l.quantity, l.unit_price)).collect();
        let totals = compute_sale_totals(&line_amounts, input.tax, input.discount);

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (warehouse_id, customer_name, subtotal, tax, discount, total,
                               payment_method, processed_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, warehouse_id, customer_name, subtotal, tax, discount, total,
                      payment_method, processed_by, created_at
            "#,
        )
        .bind(input.warehouse_id)
        .bind(&input.customer_name)
        .bind(totals.subtotal)
        .bind(input.tax)
        .bind(input.discount)
        .bind(totals.total)
        .bind(input.payment_method.as_str())
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(priced.len());
        for line in &priced {
            let item = sqlx::query_as::<_, SaleItem>(
                r#"
                INSERT INTO sale_items (sale_id, variant_id, quantity, unit_price, line_total)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, sale_id, variant_id, quantity, unit_price, line_total
                "#,
            )
            .bind(sale.id)
            .bind(line.variant_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.line_total)
            .fetch_one(&mut *tx)
            .await?;
            items.push(item);
        }

        for (base_variant_id, deduct_qty) in &deductions {
            inventory::adjust_level(&mut *tx, input.warehouse_id, *base_variant_id, -*deduct_qty)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(sale_id = %sale.id, total = %sale.total, "Sale processed");

        Ok(SaleWithItems { sale, items })
    }

    /// List sales, newest first
    pub async fn list_sales(&self, warehouse_id: Option<Uuid>) -> AppResult<Vec<Sale>> {
        let sales = match warehouse_id {
            Some(warehouse_id) => {
                sqlx::query_as::<_, Sale>(
                    r#"
                    SELECT id, warehouse_id, customer_name, subtotal, tax, discount, total,
                           payment_method, processed_by, created_at
                    FROM sales
                    WHERE warehouse_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(warehouse_id)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Sale>(
                    r#"
                    SELECT id, warehouse_id, customer_name, subtotal, tax, discount, total,
                           payment_method, processed_by, created_at
                    FROM sales
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(sales)
    }

    /// Get a sale with its line items
    pub async fn get_sale(&self, sale_id: Uuid) -> AppResult<SaleWithItems> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, warehouse_id, customer_name, subtotal, tax, discount, total,
                   payment_method, processed_by, created_at
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, variant_id, quantity, unit_price, line_total
            FROM sale_items
            WHERE sale_id = $1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(SaleWithItems { sale, items })
    }
}
