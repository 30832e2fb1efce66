//! Infrastructure layer - database schema.

pub mod migrations;

pub use migrations::Migrator;
