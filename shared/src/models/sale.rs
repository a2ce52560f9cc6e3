//! Point-of-sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed point-of-sale transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub warehouse_id: Uuid,
    pub customer_name: Option<String>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub processed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A single line on a sale, in the variant's own unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub variant_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Accepted payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    MobileMoney,
    Credit,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Credit => "credit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "mobile_money" => Some(PaymentMethod::MobileMoney),
            "credit" => Some(PaymentMethod::Credit),
            _ => None,
        }
    }
}

/// Computed money fields for a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTotals {
    pub subtotal: Decimal,
    pub total: Decimal,
}

/// Compute sale totals from (quantity, unit price) pairs.
///
/// `total = Σ(quantity × unit_price) + tax − discount`
pub fn compute_sale_totals(lines: &[(Decimal, Decimal)], tax: Decimal, discount: Decimal) -> SaleTotals {
    let subtotal: Decimal = lines.iter().map(|(qty, price)| qty * price).sum();
    SaleTotals {
        subtotal,
        total: subtotal + tax - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn totals_sum_lines_then_apply_tax_and_discount() {
        let lines = vec![(dec("2"), dec("50")), (dec("1.5"), dec("100"))];
        let totals = compute_sale_totals(&lines, dec("16"), dec("20"));

        assert_eq!(totals.subtotal, dec("250"));
        assert_eq!(totals.total, dec("246"));
    }

    #[test]
    fn empty_cart_totals_are_tax_minus_discount() {
        let totals = compute_sale_totals(&[], dec("5"), dec("5"));
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn payment_method_round_trips_through_strings() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::Card,
            PaymentMethod::MobileMoney,
            PaymentMethod::Credit,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }
}
