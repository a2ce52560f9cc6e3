//! Product catalog models: categories, families, and SKU variants
//!
//! A family groups variants that are interchangeable by unit conversion
//! (e.g. a "Milk" family with a 1L bottle and a 20L can). All stock for a
//! family is tracked against its base-unit variant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A top-level product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A family of variants interchangeable by unit conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductFamily {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A sellable/stockable SKU
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub sku: String,
    pub barcode: Option<String>,
    /// Unit label shown on receipts, e.g. "litre", "kg", "piece"
    pub unit: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub is_manufactured: bool,
    /// How many base units one of this variant represents. A factor of
    /// exactly 1 marks the family's base unit; at most one variant per
    /// family may carry it.
    pub conversion_factor: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductVariant {
    /// A factor of zero or one means the variant is stocked in its own unit.
    pub fn is_base_unit(&self) -> bool {
        self.conversion_factor.is_zero() || self.conversion_factor == Decimal::ONE
    }
}

/// The minimal view of a variant needed for unit resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantUnit {
    pub id: Uuid,
    pub conversion_factor: Decimal,
}

impl VariantUnit {
    pub fn new(id: Uuid, conversion_factor: Decimal) -> Self {
        Self {
            id,
            conversion_factor,
        }
    }

    pub fn is_base_unit(&self) -> bool {
        self.conversion_factor.is_zero() || self.conversion_factor == Decimal::ONE
    }
}

/// Failure modes of base-unit resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitResolutionError {
    #[error("product family has no base-unit variant (conversion factor 1)")]
    NoBaseUnit,

    #[error("product family has more than one base-unit variant")]
    MultipleBaseUnits,
}

/// Resolve a requested quantity of `variant` into the equivalent quantity of
/// its family's base-unit variant.
///
/// A variant with a conversion factor of zero or one is its own base unit and
/// resolves to itself unchanged, for any quantity. Any other factor scales
/// the requested quantity by the factor and redirects it to the single
/// sibling whose factor is exactly one. Zero or multiple base-unit siblings
/// are reported as errors rather than guessed around; `family_variants` must
/// be fetched in a deterministic order so failures are reproducible.
pub fn resolve_base_quantity(
    variant: &VariantUnit,
    family_variants: &[VariantUnit],
    requested_qty: Decimal,
) -> Result<(Uuid, Decimal), UnitResolutionError> {
    if variant.is_base_unit() {
        return Ok((variant.id, requested_qty));
    }

    let base_qty = requested_qty * variant.conversion_factor;

    let mut bases = family_variants
        .iter()
        .filter(|v| v.conversion_factor == Decimal::ONE);

    match (bases.next(), bases.next()) {
        (Some(base), None) => Ok((base.id, base_qty)),
        (None, _) => Err(UnitResolutionError::NoBaseUnit),
        (Some(_), Some(_)) => Err(UnitResolutionError::MultipleBaseUnits),
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
    fn base_unit_resolves_to_itself() {
        let variant = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let (id, qty) = resolve_base_quantity(&variant, &[variant.clone()], dec("7.5")).unwrap();
        assert_eq!(id, variant.id);
        assert_eq!(qty, dec("7.5"));
    }

    #[test]
    fn zero_factor_resolves_to_itself() {
        let variant = VariantUnit::new(Uuid::new_v4(), Decimal::ZERO);
        let (id, qty) = resolve_base_quantity(&variant, &[], dec("3")).unwrap();
        assert_eq!(id, variant.id);
        assert_eq!(qty, dec("3"));
    }

    #[test]
    fn aggregate_unit_scales_onto_base_sibling() {
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let bottle = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let family = vec![bottle.clone(), can.clone()];

        let (id, qty) = resolve_base_quantity(&can, &family, dec("2")).unwrap();
        assert_eq!(id, bottle.id);
        assert_eq!(qty, dec("40"));
    }

    #[test]
    fn missing_base_sibling_is_an_error() {
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let crate_of_cans = VariantUnit::new(Uuid::new_v4(), dec("240"));
        let family = vec![can.clone(), crate_of_cans];

        let err = resolve_base_quantity(&can, &family, Decimal::ONE).unwrap_err();
        assert_eq!(err, UnitResolutionError::NoBaseUnit);
    }

    #[test]
    fn duplicate_base_siblings_are_an_error() {
        let can = VariantUnit::new(Uuid::new_v4(), dec("20"));
        let family = vec![
            can.clone(),
            VariantUnit::new(Uuid::new_v4(), Decimal::ONE),
            VariantUnit::new(Uuid::new_v4(), Decimal::ONE),
        ];

        let err = resolve_base_quantity(&can, &family, Decimal::ONE).unwrap_err();
        assert_eq!(err, UnitResolutionError::MultipleBaseUnits);
    }

    #[test]
    fn fractional_factor_scales_down() {
        let half_litre = VariantUnit::new(Uuid::new_v4(), dec("0.5"));
        let litre = VariantUnit::new(Uuid::new_v4(), Decimal::ONE);
        let family = vec![litre.clone(), half_litre.clone()];

        let (id, qty) = resolve_base_quantity(&half_litre, &family, dec("4")).unwrap();
        assert_eq!(id, litre.id);
        assert_eq!(qty, dec("2"));
    }
}
