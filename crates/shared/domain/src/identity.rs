//! Identity domain entity and related types.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ROLE_USER;
use crate::error::{DomainError, DomainResult};

/// A registered principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub roles: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Build a freshly registered, active identity with the default role.
    pub fn register(registration: NewIdentity, password_hash: String) -> DomainResult<Self> {
        if password_hash.is_empty() {
            return Err(DomainError::validation("Password hash cannot be empty"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            username: registration.username,
            email: registration.email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            is_active: true,
            roles: BTreeSet::from([ROLE_USER.to_string()]),
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Check if the identity carries a role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Soft-deactivate the identity
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Some(Utc::now());
    }
}

/// Registration data for a new identity (password not yet hashed).
#[derive(Clone, Deserialize)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewIdentity {
    /// Check the claims that must be present before any lookup happens.
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("Username is required"));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::validation("Email is required"));
        }
        Ok(())
    }
}

// Never print the plaintext password
impl std::fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Identity summary returned after login (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    /// Unique identity identifier
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Role labels
    pub roles: Vec<String>,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            roles: identity.roles.iter().cloned().collect(),
        }
    }
}
