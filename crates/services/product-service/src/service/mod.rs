//! Service layer - catalog business logic.

mod cache_key;
mod product_service;

pub use cache_key::{cache_key, products_cache_prefix};
pub use product_service::{
    ProductCatalog, ProductService, CREATE_PRODUCT_FAILED, DELETE_PRODUCT_NOT_IMPLEMENTED,
    GET_PRODUCT_NOT_IMPLEMENTED, UPDATE_PRODUCT_NOT_IMPLEMENTED,
};

#[cfg(any(test, feature = "test-utils"))]
pub use product_service::MockProductService;
