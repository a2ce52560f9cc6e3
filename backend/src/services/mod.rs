//! Business logic services for the Warehouse POS Platform

pub mod auth;
pub mod collection;
pub mod inventory;
pub mod procurement;
pub mod product;
pub mod sale;
pub mod supplier;
pub mod transfer;
pub mod warehouse;

pub use auth::AuthService;
pub use collection::CollectionService;
pub use inventory::InventoryService;
pub use procurement::ProcurementService;
pub use product::ProductService;
pub use sale::SaleService;
pub use supplier::SupplierService;
pub use transfer::TransferService;
pub use warehouse::WarehouseService;
