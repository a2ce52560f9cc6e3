//! Procurement (purchase order) models and status machine

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchase order placed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procurement {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub warehouse_id: Uuid,
    pub ordered_by: Uuid,
    pub expected_delivery: Option<NaiveDate>,
    pub status: ProcurementStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ordered line on a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementItem {
    pub id: Uuid,
    pub procurement_id: Uuid,
    pub variant_id: Uuid,
    pub quantity_ordered: Decimal,
    pub quantity_received: Decimal,
    pub unit_cost: Decimal,
}

/// Lifecycle of a purchase order.
///
/// `pending → approved → ordered → partial|received`; `cancelled` is
/// reachable from any non-terminal state. `received` and `cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementStatus {
    Pending,
    Approved,
    Ordered,
    Partial,
    Received,
    Cancelled,
}

impl ProcurementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcurementStatus::Pending => "pending",
            ProcurementStatus::Approved => "approved",
            ProcurementStatus::Ordered => "ordered",
            ProcurementStatus::Partial => "partial",
            ProcurementStatus::Received => "received",
            ProcurementStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ProcurementStatus::Pending),
            "approved" => Some(ProcurementStatus::Approved),
            "ordered" => Some(ProcurementStatus::Ordered),
            "partial" => Some(ProcurementStatus::Partial),
            "received" => Some(ProcurementStatus::Received),
            "cancelled" => Some(ProcurementStatus::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcurementStatus::Received | ProcurementStatus::Cancelled)
    }

    /// Whether the caller may move an order from `self` to `next`.
    pub fn can_transition_to(&self, next: ProcurementStatus) -> bool {
        use ProcurementStatus::*;
        match (self, next) {
            (Pending, Approved)
            | (Approved, Ordered)
            | (Ordered, Partial)
            | (Ordered, Received)
            | (Partial, Received) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// The quantity credited to the ledger when an order is marked received:
/// the recorded receipt if one exists, otherwise the full ordered amount.
pub fn quantity_to_credit(quantity_ordered: Decimal, quantity_received: Decimal) -> Decimal {
    if quantity_received.is_zero() {
        quantity_ordered
    } else {
        quantity_received
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const ALL: [ProcurementStatus; 6] = [
        ProcurementStatus::Pending,
        ProcurementStatus::Approved,
        ProcurementStatus::Ordered,
        ProcurementStatus::Partial,
        ProcurementStatus::Received,
        ProcurementStatus::Cancelled,
    ];

    #[test]
    fn status_round_trips_through_strings() {
        for status in ALL {
            assert_eq!(ProcurementStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProcurementStatus::parse("shipped"), None);
    }

    #[test]
    fn terminal_states_admit_no_transitions() {
        for next in ALL {
            assert!(!ProcurementStatus::Received.can_transition_to(next));
            assert!(!ProcurementStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn cancellation_is_allowed_from_any_open_state() {
        for from in [
            ProcurementStatus::Pending,
            ProcurementStatus::Approved,
            ProcurementStatus::Ordered,
            ProcurementStatus::Partial,
        ] {
            assert!(from.can_transition_to(ProcurementStatus::Cancelled));
        }
    }

    #[test]
    fn receipt_credits_recorded_quantity_when_nonzero() {
        let ordered = Decimal::from(100);
        assert_eq!(quantity_to_credit(ordered, Decimal::ZERO), ordered);
        assert_eq!(quantity_to_credit(ordered, Decimal::from(60)), Decimal::from(60));
    }
}
