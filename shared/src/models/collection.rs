//! Field-agent collection models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A field intake event: an agent receiving product from a supplier.
///
/// The collected weight is credited to the warehouse ledger as-is, with no
/// unit conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
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
