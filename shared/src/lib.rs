//! Shared types and models for the Warehouse POS Platform
//!
//! This crate contains types shared between the backend and other components
//! of the system: domain models, status enums, the API response envelope, and
//! the pure domain logic (unit resolution, sale totals) exercised by the
//! service layer.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
