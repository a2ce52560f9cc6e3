//! Procurement tests
//!
//! Covers the purchase order status machine and receipt crediting:
//! - legal and illegal transitions
//! - unknown status strings are rejected
//! - the received transition credits quantity_received when nonzero, else
//!   quantity_ordered

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{quantity_to_credit, ProcurementStatus};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const ALL_STATUSES: [ProcurementStatus; 6] = [
    ProcurementStatus::Pending,
    ProcurementStatus::Approved,
    ProcurementStatus::Ordered,
    ProcurementStatus::Partial,
    ProcurementStatus::Received,
    ProcurementStatus::Cancelled,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The happy path walks pending → approved → ordered → received
    #[test]
    fn test_happy_path_transitions() {
        assert!(ProcurementStatus::Pending.can_transition_to(ProcurementStatus::Approved));
        assert!(ProcurementStatus::Approved.can_transition_to(ProcurementStatus::Ordered));
        assert!(ProcurementStatus::Ordered.can_transition_to(ProcurementStatus::Received));
    }

    /// Partial delivery sits between ordered and received
    #[test]
    fn test_partial_path_transitions() {
        assert!(ProcurementStatus::Ordered.can_transition_to(ProcurementStatus::Partial));
        assert!(ProcurementStatus::Partial.can_transition_to(ProcurementStatus::Received));
    }

    /// Stages cannot be skipped or reversed
    #[test]
    fn test_illegal_transitions() {
        assert!(!ProcurementStatus::Pending.can_transition_to(ProcurementStatus::Ordered));
        assert!(!ProcurementStatus::Pending.can_transition_to(ProcurementStatus::Received));
        assert!(!ProcurementStatus::Ordered.can_transition_to(ProcurementStatus::Approved));
        assert!(!ProcurementStatus::Received.can_transition_to(ProcurementStatus::Partial));
    }

    /// Unknown status strings never parse
    #[test]
    fn test_unknown_status_rejected() {
        assert_eq!(ProcurementStatus::parse("shipped"), None);
        assert_eq!(ProcurementStatus::parse("RECEIVED"), None);
        assert_eq!(ProcurementStatus::parse(""), None);
    }

    /// Every status survives an as_str/parse round trip
    #[test]
    fn test_status_round_trip() {
        for status in ALL_STATUSES {
            assert_eq!(ProcurementStatus::parse(status.as_str()), Some(status));
        }
    }

    /// Marking received without recording receipts credits the full order
    #[test]
    fn test_full_credit_without_receipts() {
        assert_eq!(quantity_to_credit(dec("100"), Decimal::ZERO), dec("100"));
    }

    /// A recorded partial receipt credits exactly the received quantity
    #[test]
    fn test_partial_receipt_credit() {
        assert_eq!(quantity_to_credit(dec("100"), dec("60")), dec("60"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = ProcurementStatus> {
        prop::sample::select(ALL_STATUSES.to_vec())
    }

    /// Strategy for generating positive quantities
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10_000i64).prop_map(|n| Decimal::new(n, 1)) // 0.1 to 1000.0
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Terminal states never admit a transition
        #[test]
        fn prop_terminal_states_are_final(next in status_strategy()) {
            prop_assert!(!ProcurementStatus::Received.can_transition_to(next));
            prop_assert!(!ProcurementStatus::Cancelled.can_transition_to(next));
        }

        /// No state transitions to itself
        #[test]
        fn prop_no_self_transition(status in status_strategy()) {
            prop_assert!(!status.can_transition_to(status));
        }

        /// Cancellation is reachable from exactly the non-terminal states
        #[test]
        fn prop_cancellation_reachability(from in status_strategy()) {
            let can_cancel = from.can_transition_to(ProcurementStatus::Cancelled);
            prop_assert_eq!(can_cancel, !from.is_terminal());
        }

        /// The credited quantity is always one of the two line quantities
        #[test]
        fn prop_credit_is_ordered_or_received(
            ordered in quantity_strategy(),
            received in prop::option::of(quantity_strategy())
        ) {
            let received = received.unwrap_or(Decimal::ZERO);
            let credit = quantity_to_credit(ordered, received);

            if received.is_zero() {
                prop_assert_eq!(credit, ordered);
            } else {
                prop_assert_eq!(credit, received);
            }
        }
    }
}
