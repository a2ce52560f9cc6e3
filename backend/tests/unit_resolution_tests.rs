//! Unit resolution tests
//!
//! Covers base-unit resolution across product-variant families:
//! - resolving a base-unit variant is the identity
//! - aggregate units scale onto the family's base sibling
//! - zero or multiple base siblings are rejected

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::{resolve_base_quantity, UnitResolutionError, VariantUnit};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Resolving a factor-1 variant returns it unchanged
    #[test]
    fn test_base_unit_identity() {
        let bottle = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let (id, qty) = resolve_base_quantity(&bottle, &[bottle.clone()], dec("12.25")).unwrap();

        assert_eq!(id, bottle.id);
        assert_eq!(qty, dec("12.25"));
    }

    /// A factor of zero is treated as "no conversion"
    #[test]
    fn test_zero_factor_identity() {
        let item = VariantUnit::new(Uuid::new_v4(), Decimal::ZERO);
        let (id, qty) = resolve_base_quantity(&item, &[], dec("5")).unwrap();

        assert_eq!(id, item.id);
        assert_eq!(qty, dec("5"));
    }

    /// A 20x aggregate selling 2 units resolves to 40 base units
    #[test]
    fn test_conversion_correctness() {
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let bottle = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let family = vec![bottle.clone(), can.clone()];

        let (id, qty) = resolve_base_quantity(&can, &family, dec("2")).unwrap();

        assert_eq!(id, bottle.id);
        assert_eq!(qty, dec("40"));
    }

    /// A family with only aggregate units cannot resolve
    #[test]
    fn test_no_base_sibling() {
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let pallet = VariantUnit::new(Uuid::new_v4(), dec("480"));
        let family = vec![can.clone(), pallet];

        let err = resolve_base_quantity(&can, &family, dec("1")).unwrap_err();
        assert_eq!(err, UnitResolutionError::NoBaseUnit);
    }

    /// Two factor-1 siblings make resolution ambiguous
    #[test]
    fn test_multiple_base_siblings() {
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let family = vec![
            can.clone(),
            VariantUnit::new(Uuid::new_v4(), Decimal::ONE),
            VariantUnit::new(Uuid::new_v4(), Decimal::ONE),
        ];

        let err = resolve_base_quantity(&can, &family, dec("1")).unwrap_err();
        assert_eq!(err, UnitResolutionError::MultipleBaseUnits);
    }

    /// Fractional quantities of an aggregate unit scale exactly
    #[test]
    fn test_fractional_quantity() {
        let sack = VariantUnit::new(Uuid::new_v4(), dec("50"));
        let kg = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let family = vec![kg.clone(), sack.clone()];

        let (id, qty) = resolve_base_quantity(&sack, &family, dec("0.5")).unwrap();

        assert_eq!(id, kg.id);
        assert_eq!(qty, dec("25"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating positive quantities
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    /// Strategy for generating aggregate conversion factors (> 1)
    fn aggregate_factor_strategy() -> impl Strategy<Value = Decimal> {
        (2i64..=1000i64).prop_map(Decimal::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Resolving a base-unit variant is the identity, for any quantity
        #[test]
        fn prop_base_unit_resolution_idempotent(qty in quantity_strategy()) {
            let base = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
            let (id, resolved) = resolve_base_quantity(&base, &[base.clone()], qty).unwrap();

            prop_assert_eq!(id, base.id);
            prop_assert_eq!(resolved, qty);
        }

        /// Resolved base quantity is exactly requested × factor
        #[test]
        fn prop_conversion_scales_by_factor(
            qty in quantity_strategy(),
            factor in aggregate_factor_strategy()
        ) {
            let aggregate = VariantUnit::new(Uuid::new_v4(), factor);
            let base = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
            let family = vec![base.clone(), aggregate.clone()];

            let (id, resolved) = resolve_base_quantity(&aggregate, &family, qty).unwrap();

            prop_assert_eq!(id, base.id);
            prop_assert_eq!(resolved, qty * factor);
        }

        /// Resolution never invents or drops stock: the base quantity of an
        /// aggregate is always at least the requested quantity
        #[test]
        fn prop_aggregate_resolution_never_shrinks(
            qty in quantity_strategy(),
            factor in aggregate_factor_strategy()
        ) {
            let aggregate = VariantUnit::new(Uuid::new_v4(), factor);
            let base = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
            let family = vec![base, aggregate.clone()];

            let (_, resolved) = resolve_base_quantity(&aggregate, &family, qty).unwrap();
            prop_assert!(resolved >= qty);
        }

        /// An aggregate variant without a base sibling always errors
        #[test]
        fn prop_missing_base_always_errors(
            qty in quantity_strategy(),
            factor in aggregate_factor_strategy()
        ) {
            let aggregate = VariantUnit::new(Uuid::new_v4(), factor);
            let family = vec![aggregate.clone()];

            let result = resolve_base_quantity(&aggregate, &family, qty);
            prop_assert_eq!(result.unwrap_err(), UnitResolutionError::NoBaseUnit);
        }
    }
}
