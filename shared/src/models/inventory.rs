//! Inventory ledger models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The ledger row for one (warehouse, variant) pair.
///
/// One row per pair; absence of a row means zero on hand. Quantity is only
/// ever changed additively by the sale/procurement/collection/transfer
/// processors, never overwritten wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: Decimal,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Why a ledger quantity changed, for movement reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Sale,
    Procurement,
    Collection,
    TransferOut,
    TransferIn,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Sale => "sale",
            MovementKind::Procurement => "procurement",
            MovementKind::Collection => "collection",
            MovementKind::TransferOut => "transfer_out",
            MovementKind::TransferIn => "transfer_in",
        }
    }
}
