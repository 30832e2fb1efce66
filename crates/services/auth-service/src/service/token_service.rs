//! Session token issuance.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use common::{AppResult, JwtKeys};
use domain::{Identity, ACCESS_TOKEN_LIFETIME_MINUTES, REFRESH_TOKEN_BYTES};

/// Access/refresh token pair produced at login. Never persisted.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs access tokens and mints opaque refresh tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: JwtKeys,
}

impl TokenIssuer {
    pub fn new(keys: JwtKeys) -> Self {
        Self { keys }
    }

    /// Issue a token pair for `identity`, expiring 15 minutes from now.
    pub fn issue(&self, identity: &Identity) -> AppResult<SessionTokens> {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::minutes(ACCESS_TOKEN_LIFETIME_MINUTES);

        let claims = self.keys.claims_for(
            identity.id,
            &identity.username,
            &identity.email,
            identity.roles.iter().cloned().collect(),
            issued_at,
            expires_at,
        );

        Ok(SessionTokens {
            access_token: self.keys.encode(&claims)?,
            refresh_token: generate_refresh_token(),
            expires_at,
        })
    }
}

/// 64 random bytes, standard base64.
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}
