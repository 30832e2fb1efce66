//! Repository layer - identity persistence.

pub mod entities;
mod identity_repository;

pub use identity_repository::{IdentityRepository, IdentityStore};

#[cfg(any(test, feature = "test-utils"))]
pub use identity_repository::MockIdentityRepository;
