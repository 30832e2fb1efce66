//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared between the auth and product services.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod events;
pub mod identity;
pub mod password;

pub use catalog::{
    total_pages, CatalogEntry, CatalogEntryView, CatalogPage, CatalogQuery, NewCatalogEntry,
    UpdateCatalogEntry,
};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use events::{DomainEvent, EventPayload, ProductCreated};
pub use identity::{Identity, IdentitySummary, NewIdentity};
pub use password::{hash_password, verify_password};
pub use rust_decimal::Decimal;
