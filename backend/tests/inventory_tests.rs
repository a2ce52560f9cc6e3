//! Inventory ledger tests
//!
//! Covers the additive-adjustment model of the stock ledger:
//! - conservation: final quantity equals increments minus decrements
//! - absent rows read as zero
//! - the caller-side insufficient-stock check

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// In-memory model of one (warehouse, variant) ledger row, mirroring the
/// additive upsert the service applies
#[derive(Debug, Default)]
struct LedgerRow {
    quantity: Option<Decimal>,
}

impl LedgerRow {
    /// Absent rows read as zero, not as an error
    fn get(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO)
    }

    /// Additive upsert: create at the delta when absent, add otherwise
    fn adjust(&mut self, delta: Decimal) -> Decimal {
        let next = self.get() + delta;
        self.quantity = Some(next);
        next
    }

    /// The check-then-adjust sequence used by sale and transfer processing
    fn checked_deduct(&mut self, qty: Decimal) -> Result<Decimal, &'static str> {
        if self.get() < qty {
            return Err("Insufficient stock");
        }
        Ok(self.adjust(-qty))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// A row that was never written reads as zero
    #[test]
    fn test_absent_row_reads_zero() {
        let row = LedgerRow::default();
        assert_eq!(row.get(), Decimal::ZERO);
    }

    /// Adjusting an absent row creates it at the delta
    #[test]
    fn test_adjust_creates_row() {
        let mut row = LedgerRow::default();
        assert_eq!(row.adjust(dec("25.5")), dec("25.5"));
        assert_eq!(row.get(), dec("25.5"));
    }

    /// Increments and decrements accumulate additively
    #[test]
    fn test_adjustments_accumulate() {
        let mut row = LedgerRow::default();
        row.adjust(dec("100"));
        row.adjust(dec("-30"));
        row.adjust(dec("12.5"));

        assert_eq!(row.get(), dec("82.5"));
    }

    /// A deduction larger than the balance is rejected and leaves the row
    /// unchanged
    #[test]
    fn test_checked_deduct_rejects_oversell() {
        let mut row = LedgerRow::default();
        row.adjust(dec("50"));

        assert!(row.checked_deduct(dec("60")).is_err());
        assert_eq!(row.get(), dec("50"));
    }

    /// Deducting the exact balance drains the row to zero
    #[test]
    fn test_checked_deduct_exact_balance() {
        let mut row = LedgerRow::default();
        row.adjust(dec("50"));

        assert_eq!(row.checked_deduct(dec("50")).unwrap(), Decimal::ZERO);
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

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Conservation: applying any sequence of increments and decrements
        /// through the validated path leaves the balance equal to the sum of
        /// increments minus the sum of applied decrements
        #[test]
        fn prop_ledger_conservation(
            increments in prop::collection::vec(quantity_strategy(), 1..20),
            decrements in prop::collection::vec(quantity_strategy(), 0..20)
        ) {
            let mut row = LedgerRow::default();
            let mut credited = Decimal::ZERO;
            let mut debited = Decimal::ZERO;

            for qty in &increments {
                row.adjust(*qty);
                credited += qty;
            }
            for qty in &decrements {
                if row.checked_deduct(*qty).is_ok() {
                    debited += qty;
                }
            }

            prop_assert_eq!(row.get(), credited - debited);
        }

        /// The validated path never drives the balance negative
        #[test]
        fn prop_no_negative_balance(
            ops in prop::collection::vec((any::<bool>(), quantity_strategy()), 1..40)
        ) {
            let mut row = LedgerRow::default();

            for (is_credit, qty) in &ops {
                if *is_credit {
                    row.adjust(*qty);
                } else {
                    let _ = row.checked_deduct(*qty);
                }
            }

            prop_assert!(row.get() >= Decimal::ZERO);
        }

        /// A rejected deduction leaves the balance untouched
        #[test]
        fn prop_rejected_deduction_is_noop(
            balance in quantity_strategy(),
            extra in quantity_strategy()
        ) {
            let mut row = LedgerRow::default();
            row.adjust(balance);

            let result = row.checked_deduct(balance + extra);
            prop_assert!(result.is_err());
            prop_assert_eq!(row.get(), balance);
        }
    }
}
