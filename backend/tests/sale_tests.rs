//! Sale processing tests
//!
//! Covers the money and stock semantics of sale processing:
//! - total = Σ(quantity × unit_price) + tax − discount
//! - per-base-variant accumulation before the stock check
//! - all-or-nothing rejection on insufficient stock

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use shared::{compute_sale_totals, resolve_base_quantity, VariantUnit};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Accumulate cart lines into per-base-variant deductions, the way sale
/// processing sums lines before checking stock
fn accumulate_deductions(
    lines: &[(VariantUnit, Decimal)],
    family: &[VariantUnit],
) -> Result<BTreeMap<Uuid, Decimal>, shared::UnitResolutionError> {
    let mut deductions = BTreeMap::new();
    for (variant, qty) in lines {
        let (base_id, base_qty) = resolve_base_quantity(variant, family, *qty)?;
        *deductions.entry(base_id).or_insert(Decimal::ZERO) += base_qty;
    }
    Ok(deductions)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Totals follow Σ(qty × price) + tax − discount
    #[test]
    fn test_total_calculation() {
        let lines = vec![(dec("3"), dec("120")), (dec("0.5"), dec("80"))];
        let totals = compute_sale_totals(&lines, dec("64"), dec("14"));

        assert_eq!(totals.subtotal, dec("400"));
        assert_eq!(totals.total, dec("450"));
    }

    /// A discount can bring the total below the subtotal
    #[test]
    fn test_discount_reduces_total() {
        let lines = vec![(dec("1"), dec("100"))];
        let totals = compute_sale_totals(&lines, Decimal::ZERO, dec("25"));

        assert_eq!(totals.total, dec("75"));
    }

    /// Two lines resolving to the same base variant are summed before the
    /// stock check
    #[test]
    fn test_same_base_lines_accumulate() {
        let bottle = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let family = vec![bottle.clone(), can.clone()];

        // 2 cans (40 bottles) + 5 bottles = 45 bottles deducted
        let lines = vec![(can, dec("2")), (bottle.clone(), dec("5"))];
        let deductions = accumulate_deductions(&lines, &family).unwrap();

        assert_eq!(deductions.len(), 1);
        assert_eq!(deductions[&bottle.id], dec("45"));
    }

    /// The accumulated demand is what gets checked: stock covering each line
    /// individually but not their sum must be rejected
    #[test]
    fn test_accumulated_demand_exceeds_stock() {
        let bottle = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let family = vec![bottle.clone(), can.clone()];

        let lines = vec![(can, dec("1")), (bottle.clone(), dec("15"))];
        let deductions = accumulate_deductions(&lines, &family).unwrap();

        let on_hand = dec("30"); // covers 20 or 15 alone, not 35
        let demand = deductions[&bottle.id];
        assert!(on_hand < demand);
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
        (1i64..=10_000i64).prop_map(|n| Decimal::new(n, 1)) // 0.1 to 1000.0
    }

    /// Strategy for generating unit prices
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 2)) // 0.01 to 1000.00
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Totals are exactly Σ(qty × price) + tax − discount for any cart
        #[test]
        fn prop_total_formula(
            lines in prop::collection::vec((quantity_strategy(), price_strategy()), 1..15),
            tax in price_strategy(),
            discount in price_strategy()
        ) {
            let totals = compute_sale_totals(&lines, tax, discount);

            let expected_subtotal: Decimal = lines.iter().map(|(q, p)| q * p).sum();
            prop_assert_eq!(totals.subtotal, expected_subtotal);
            prop_assert_eq!(totals.total, expected_subtotal + tax - discount);
        }

        /// With zero tax and discount, total equals subtotal
        #[test]
        fn prop_total_equals_subtotal_without_adjustments(
            lines in prop::collection::vec((quantity_strategy(), price_strategy()), 1..15)
        ) {
            let totals = compute_sale_totals(&lines, Decimal::ZERO, Decimal::ZERO);
            prop_assert_eq!(totals.total, totals.subtotal);
        }

        /// Accumulated deductions preserve total base quantity: summing per
        /// base variant never changes the overall demand
        #[test]
        fn prop_accumulation_preserves_demand(
            quantities in prop::collection::vec(quantity_strategy(), 1..10)
        ) {
            let bottle = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
            let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
            let family = vec![bottle.clone(), can.clone()];

            // Alternate bottle and can lines
            let lines: Vec<(VariantUnit, Decimal)> = quantities
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    if i % 2 == 0 {
                        (bottle.clone(), *q)
                    } else {
                        (can.clone(), *q)
                    }
                })
                .collect();

            let expected: Decimal = lines
                .iter()
                .map(|(v, q)| if v.id == can.id { q * dec("20") } else { *q })
                .sum();

            let deductions = accumulate_deductions(&lines, &family).unwrap();
            let total: Decimal = deductions.values().copied().sum();

            prop_assert_eq!(total, expected);
            // Everything lands on the single base variant
            prop_assert_eq!(deductions.len(), 1);
        }
    }
}
