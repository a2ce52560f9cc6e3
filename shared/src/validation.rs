//! Validation utilities for the Warehouse POS Platform

use rust_decimal::Decimal;

/// Validate that a quantity is strictly positive
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate that a money amount is not negative
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate a unit conversion factor (zero means "no conversion")
pub fn validate_conversion_factor(factor: Decimal) -> Result<(), &'static str> {
    if factor < Decimal::ZERO {
        return Err("Conversion factor cannot be negative");
    }
    Ok(())
}

/// Validate an SKU: non-empty and free of whitespace
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.trim().is_empty() {
        return Err("SKU cannot be empty");
    }
    if sku.chars().any(|c| c.is_whitespace()) {
        return Err("SKU cannot contain whitespace");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn zero_and_negative_quantities_are_rejected() {
        assert!(validate_positive_quantity(Decimal::ZERO).is_err());
        assert!(validate_positive_quantity(Decimal::from_str("-1").unwrap()).is_err());
        assert!(validate_positive_quantity(Decimal::from_str("0.001").unwrap()).is_ok());
    }

    #[test]
    fn negative_conversion_factor_is_rejected() {
        assert!(validate_conversion_factor(Decimal::from_str("-0.5").unwrap()).is_err());
        assert!(validate_conversion_factor(Decimal::ZERO).is_ok());
        assert!(validate_conversion_factor(Decimal::from(20)).is_ok());
    }

    #[test]
    fn skus_with_whitespace_are_rejected() {
        assert!(validate_sku("MILK-1L").is_ok());
        assert!(validate_sku("MILK 1L").is_err());
        assert!(validate_sku("  ").is_err());
    }
}
