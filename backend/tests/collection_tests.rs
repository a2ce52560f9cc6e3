//! Collection tests
//!
//! Covers field intake semantics:
//! - weight is credited to the ledger as-is, with no unit conversion
//! - an unset warehouse falls back to the designated default
//! - missing defaults are a configuration error, not a silent guess

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::validate_positive_quantity;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Mirror of the warehouse fallback applied when recording a collection
fn resolve_collection_warehouse(
    requested: Option<Uuid>,
    default_warehouse: Option<Uuid>,
) -> Result<Uuid, &'static str> {
    match requested {
        Some(id) => Ok(id),
        None => default_warehouse.ok_or("No default warehouse is configured"),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// An explicit warehouse wins over the default
    #[test]
    fn test_explicit_warehouse_used() {
        let explicit = Uuid::new_v4();
        let default = Uuid::new_v4();

        let resolved = resolve_collection_warehouse(Some(explicit), Some(default)).unwrap();
        assert_eq!(resolved, explicit);
    }

    /// An unset warehouse falls back to the default
    #[test]
    fn test_default_warehouse_fallback() {
        let default = Uuid::new_v4();

        let resolved = resolve_collection_warehouse(None, Some(default)).unwrap();
        assert_eq!(resolved, default);
    }

    /// No warehouse and no default is an error
    #[test]
    fn test_missing_default_is_error() {
        assert!(resolve_collection_warehouse(None, None).is_err());
    }

    /// Collected weight must be positive
    #[test]
    fn test_weight_validation() {
        assert!(validate_positive_quantity(dec("12.5")).is_ok());
        assert!(validate_positive_quantity(Decimal::ZERO).is_err());
        assert!(validate_positive_quantity(dec("-3")).is_err());
    }

    /// The ledger credit equals the collected weight exactly; no conversion
    /// factor is applied
    #[test]
    fn test_weight_credited_unconverted() {
        let weight = dec("37.25");
        let balance_before = dec("100");

        let balance_after = balance_before + weight;
        assert_eq!(balance_after, dec("137.25"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating positive weights
    fn weight_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Collections always increase the balance by exactly the weight
        #[test]
        fn prop_collection_credits_weight(
            balance in weight_strategy(),
            weight in weight_strategy()
        ) {
            let after = balance + weight;
            prop_assert_eq!(after - balance, weight);
            prop_assert!(after > balance);
        }

        /// Warehouse resolution is total when a default exists
        #[test]
        fn prop_resolution_total_with_default(explicit in any::<bool>()) {
            let default = Uuid::new_v4();
            let requested = explicit.then(Uuid::new_v4);

            prop_assert!(resolve_collection_warehouse(requested, Some(default)).is_ok());
        }
    }
}
