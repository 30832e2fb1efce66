//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::product_handler::{
    CreateProductRequest, ProductCreatedResponse, UpdateProductRequest,
};
use domain::{CatalogEntryView, CatalogPage};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::product_handler::list_products,
        crate::handlers::product_handler::create_product,
        crate::handlers::product_handler::get_product,
        crate::handlers::product_handler::update_product,
        crate::handlers::product_handler::delete_product,
    ),
    components(
        schemas(
            CreateProductRequest,
            UpdateProductRequest,
            ProductCreatedResponse,
            CatalogPage,
            CatalogEntryView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Products", description = "Catalog endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
