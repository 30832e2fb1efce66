//! Identity repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr};
use tracing::debug;

use super::entities::identity::{self, ActiveModel, Entity as IdentityEntity};
use common::{AppError, AppResult};
use domain::Identity;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity repository trait for dependency injection.
///
/// Lookups return inactive identities too; callers decide what inactive means.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find identity by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>>;

    /// Find identity by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Persist a new identity.
    ///
    /// A unique index violation surfaces as `DuplicateUsername` or `DuplicateEmail`.
    async fn insert(&self, identity: &Identity) -> AppResult<()>;
}

/// Concrete implementation of IdentityRepository
pub struct IdentityStore {
    db: DatabaseConnection,
}

impl IdentityStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityRepository for IdentityStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>> {
        IdentityEntity::find()
            .filter(identity::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .map(Identity::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        IdentityEntity::find()
            .filter(identity::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Identity::try_from)
            .transpose()
    }

    async fn insert(&self, identity: &Identity) -> AppResult<()> {
        let active_model = ActiveModel::from(identity);

        active_model
            .insert(&self.db)
            .await
            .map_err(map_insert_error)?;

        debug!(identity_id = %identity.id, "Identity row inserted");
        Ok(())
    }
}

/// Translate unique index violations into duplicate errors.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => duplicate_from_detail(&detail)
            .unwrap_or_else(|| AppError::Database(err)),
        _ => AppError::Database(err),
    }
}

/// Pick the duplicate kind from the violated index or column name.
fn duplicate_from_detail(detail: &str) -> Option<AppError> {
    let detail = detail.to_ascii_lowercase();
    if detail.contains("username") {
        Some(AppError::DuplicateUsername)
    } else if detail.contains("email") {
        Some(AppError::DuplicateEmail)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_from_detail() {
        let username = r#"duplicate key value violates unique constraint "idx_identities_username""#;
        assert!(matches!(
            duplicate_from_detail(username),
            Some(AppError::DuplicateUsername)
        ));

        let email = r#"duplicate key value violates unique constraint "idx_identities_email""#;
        assert!(matches!(
            duplicate_from_detail(email),
            Some(AppError::DuplicateEmail)
        ));

        assert!(duplicate_from_detail("identities_pkey").is_none());
    }
}
