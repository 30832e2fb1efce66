//! Authentication service - registration, login and token refresh.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::repository::IdentityRepository;
use crate::service::token_service::TokenIssuer;
use common::{AppError, AppResult};
use domain::{hash_password, verify_password, Identity, IdentitySummary, NewIdentity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Message carried by the refresh failure
pub const REFRESH_NOT_IMPLEMENTED: &str = "Token refresh not implemented yet";

/// Message carried by a non-duplicate insert failure
pub const CREATE_USER_FAILED: &str = "Failed to create user";

/// Successful login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Signed JWT access token
    pub access_token: String,
    /// Opaque refresh token
    pub refresh_token: String,
    /// Access token expiry (15 minutes after issue)
    pub expires_at: DateTime<Utc>,
    pub user: IdentitySummary,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new identity with the default role
    async fn register(&self, registration: NewIdentity) -> AppResult<()>;

    /// Resolve by username, then email, and issue a token pair
    async fn login(&self, username_or_email: &str, password: &str) -> AppResult<LoginResponse>;

    /// Exchange a refresh token for a new access token (not available)
    async fn refresh_token(&self, refresh_token: &str) -> AppResult<String>;
}

/// Concrete implementation of AuthService backed by an identity repository.
pub struct Authenticator {
    identities: Arc<dyn IdentityRepository>,
    tokens: TokenIssuer,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(identities: Arc<dyn IdentityRepository>, tokens: TokenIssuer) -> Self {
        Self { identities, tokens }
    }

    async fn resolve(&self, username_or_email: &str) -> AppResult<Option<Identity>> {
        if let Some(identity) = self.identities.find_by_username(username_or_email).await? {
            return Ok(Some(identity));
        }
        self.identities.find_by_email(username_or_email).await
    }
}

/// Log an unexpected failure and hide its detail behind `Internal`.
fn unexpected(operation: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        error!(operation, error = ?e, "Unexpected failure");
        match e {
            AppError::Internal(_) => e,
            other => AppError::internal(format!("{}: {}", operation, other)),
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: NewIdentity) -> AppResult<()> {
        registration.validate()?;

        info!(username = %registration.username, "Registering identity");

        let username_taken = self
            .identities
            .find_by_username(&registration.username)
            .await
            .map_err(unexpected("register"))?
            .is_some();
        if username_taken {
            warn!(username = %registration.username, "Registration failed: username already exists");
            return Err(AppError::DuplicateUsername);
        }

        let email_taken = self
            .identities
            .find_by_email(&registration.email)
            .await
            .map_err(unexpected("register"))?
            .is_some();
        if email_taken {
            warn!(email = %registration.email, "Registration failed: email already exists");
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(&registration.password);
        let identity = Identity::register(registration, password_hash)?;

        match self.identities.insert(&identity).await {
            Ok(()) => {
                info!(identity_id = %identity.id, username = %identity.username, "Identity registered");
                Ok(())
            }
            // Lost a race with a concurrent registration
            Err(e @ (AppError::DuplicateUsername | AppError::DuplicateEmail)) => {
                warn!(username = %identity.username, error = %e, "Registration failed at insert");
                Err(e)
            }
            Err(e) => {
                error!(username = %identity.username, error = ?e, "Failed to persist identity");
                Err(AppError::persistence(CREATE_USER_FAILED))
            }
        }
    }

    async fn login(&self, username_or_email: &str, password: &str) -> AppResult<LoginResponse> {
        let identity = match self
            .resolve(username_or_email)
            .await
            .map_err(unexpected("login"))?
        {
            Some(identity) => identity,
            None => {
                warn!(login = %username_or_email, "Login failed: unknown identity");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !identity.is_active {
            warn!(identity_id = %identity.id, "Login failed: account deactivated");
            return Err(AppError::AccountDeactivated);
        }

        if !verify_password(password, &identity.password_hash) {
            warn!(identity_id = %identity.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self.tokens.issue(&identity).map_err(unexpected("login"))?;

        info!(identity_id = %identity.id, username = %identity.username, "Login succeeded");

        Ok(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_at,
            user: IdentitySummary::from(&identity),
        })
    }

    async fn refresh_token(&self, _refresh_token: &str) -> AppResult<String> {
        warn!("Token refresh requested but not implemented");
        Err(AppError::not_implemented(REFRESH_NOT_IMPLEMENTED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockIdentityRepository;
    use common::{JwtConfig, JwtKeys};
    use mockall::predicate::eq;

    fn tokens() -> TokenIssuer {
        TokenIssuer::new(JwtKeys::new(&JwtConfig {
            secret: "unit-test-secret-with-enough-length!".to_string(),
            issuer: "auth-service".to_string(),
            audience: "services".to_string(),
        }))
    }

    fn registration() -> NewIdentity {
        NewIdentity {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
        }
    }

    fn stored_identity(password: &str) -> Identity {
        Identity::register(registration(), hash_password(password)).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_username_skips_insert() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username()
            .with(eq("alice"))
            .returning(|_| Ok(Some(stored_identity("secret1"))));
        repo.expect_insert().times(0);

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.register(registration()).await;

        assert!(matches!(result, Err(AppError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_duplicate_email_skips_insert() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .with(eq("alice@example.com"))
            .returning(|_| Ok(Some(stored_identity("secret1"))));
        repo.expect_insert().times(0);

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.register(registration()).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_insert_stores_hashed_password_and_default_role() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|identity| {
                identity.password_hash == hash_password("secret1")
                    && identity.is_active
                    && identity.has_role("User")
                    && identity.roles.len() == 1
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = Authenticator::new(Arc::new(repo), tokens());
        tokio_test::assert_ok!(service.register(registration()).await);
    }

    #[tokio::test]
    async fn test_unique_violation_at_insert_is_duplicate() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(AppError::DuplicateEmail));

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.register(registration()).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_other_insert_failure_is_persistence_failure() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(AppError::internal("disk full")));

        let service = Authenticator::new(Arc::new(repo), tokens());
        let result = service.register(registration()).await;

        match result {
            Err(AppError::PersistenceFailure(msg)) => assert_eq!(msg, CREATE_USER_FAILED),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_is_internal() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Err(AppError::internal("connection reset")));

        let service = Authenticator::new(Arc::new(repo), tokens());

        let register = service.register(registration()).await;
        assert!(matches!(register, Err(AppError::Internal(_))));

        let login = service.login("alice", "secret1").await;
        let err = login.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_blank_username_rejected_before_lookup() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username().times(0);

        let service = Authenticator::new(Arc::new(repo), tokens());
        let mut input = registration();
        input.username = String::new();

        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_falls_back_to_email() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .with(eq("alice@example.com"))
            .returning(|_| Ok(Some(stored_identity("secret1"))));

        let service = Authenticator::new(Arc::new(repo), tokens());
        let response = service.login("alice@example.com", "secret1").await.unwrap();

        assert_eq!(response.user.username, "alice");
    }

    #[tokio::test]
    async fn test_refresh_always_not_implemented() {
        let repo = MockIdentityRepository::new();
        let service = Authenticator::new(Arc::new(repo), tokens());

        for input in ["", "anything"] {
            match service.refresh_token(input).await {
                Err(AppError::NotImplemented(msg)) => assert_eq!(msg, REFRESH_NOT_IMPLEMENTED),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }
}
