//! Warehouse models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical stock location.
///
/// At most one warehouse carries `is_default`; collections that name no
/// warehouse are credited there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}
