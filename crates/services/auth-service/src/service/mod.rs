//! Authentication service business logic.

mod auth_service;
mod token_service;

pub use auth_service::{
    AuthService, Authenticator, LoginResponse, CREATE_USER_FAILED, REFRESH_NOT_IMPLEMENTED,
};
pub use token_service::{generate_refresh_token, SessionTokens, TokenIssuer};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
