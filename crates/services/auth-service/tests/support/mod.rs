//! Shared fixtures for auth-service integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use auth_service_lib::repository::IdentityRepository;
use auth_service_lib::service::{Authenticator, TokenIssuer};
use common::{AppError, AppResult, JwtConfig, JwtKeys};
use domain::{Identity, NewIdentity};

/// Identity store kept in memory, enforcing the same unique keys as the table.
#[derive(Default)]
pub struct InMemoryIdentities {
    rows: Mutex<Vec<Identity>>,
}

impl InMemoryIdentities {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn update(&self, username: &str, f: impl FnOnce(&mut Identity)) {
        let mut rows = self.rows.lock().unwrap();
        let identity = rows
            .iter_mut()
            .find(|i| i.username == username)
            .expect("identity exists");
        f(identity);
    }

    pub fn get(&self, username: &str) -> Option<Identity> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.username == username)
            .cloned()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentities {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>> {
        Ok(self.get(username))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.email == email)
            .cloned())
    }

    async fn insert(&self, identity: &Identity) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|i| i.username == identity.username) {
            return Err(AppError::DuplicateUsername);
        }
        if rows.iter().any(|i| i.email == identity.email) {
            return Err(AppError::DuplicateEmail);
        }
        rows.push(identity.clone());
        Ok(())
    }
}

pub fn jwt_keys() -> JwtKeys {
    JwtKeys::new(&JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        issuer: "auth-service".to_string(),
        audience: "services".to_string(),
    })
}

pub fn authenticator() -> (Authenticator, Arc<InMemoryIdentities>) {
    let store = Arc::new(InMemoryIdentities::default());
    let service = Authenticator::new(store.clone(), TokenIssuer::new(jwt_keys()));
    (service, store)
}

pub fn registration(username: &str, email: &str, password: &str) -> NewIdentity {
    NewIdentity {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        first_name: None,
        last_name: None,
    }
}
