//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Identity Roles
// =============================================================================

/// Default role assigned to newly registered identities
pub const ROLE_USER: &str = "User";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "Admin";

// =============================================================================
// Validation
// =============================================================================

/// Maximum catalog entry name length
pub const MAX_PRODUCT_NAME_LENGTH: u64 = 200;

// =============================================================================
// Authentication
// =============================================================================

/// Access token lifetime in minutes
pub const ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 15;

/// Number of random bytes in a refresh token
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Catalog Queries
// =============================================================================

/// Default page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Default number of entries per page
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of entries per page
pub const MAX_PAGE_SIZE: u64 = 100;

/// Cache namespace for catalog query pages
pub const PRODUCTS_CACHE_NAMESPACE: &str = "products";

/// Time-to-live of a cached catalog page, in seconds (30 minutes)
pub const PRODUCTS_CACHE_TTL_SECONDS: u64 = 30 * 60;
