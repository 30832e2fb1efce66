//! Repository layer - catalog persistence.

mod catalog_repository;
pub mod entities;

pub use catalog_repository::{sku_conflict_message, CatalogRepository, CatalogSlice, CatalogStore};

#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;
