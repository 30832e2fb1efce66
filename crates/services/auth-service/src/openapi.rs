//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::auth_handler::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::service::LoginResponse;
use domain::IdentitySummary;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::refresh,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            LoginResponse,
            IdentitySummary,
        )
    ),
    tags(
        (name = "Authentication", description = "Registration and login endpoints"),
    )
)]
pub struct ApiDoc;
