//! Product handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    middleware,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::{AppResult, Created, ServiceResult, ValidatedJson};
use domain::{
    CatalogEntryView, CatalogPage, CatalogQuery, Decimal, NewCatalogEntry, UpdateCatalogEntry,
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE,
};

use crate::middleware::{auth_middleware, CurrentUser};
use crate::state::AppState;

/// Catalog listing parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// 1-based page number (default 1)
    pub page_number: Option<i64>,
    /// Entries per page, clamped to 1..=100 (default 10)
    pub page_size: Option<i64>,
    /// Exact category match
    pub category: Option<String>,
    /// Substring of name or description
    pub search_term: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl From<ProductListParams> for CatalogQuery {
    fn from(params: ProductListParams) -> Self {
        CatalogQuery::new(
            params.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            params.category,
            params.search_term,
            params.min_price,
            params.max_price,
        )
    }
}

/// Product creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    #[schema(value_type = String, example = "24.99")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    #[schema(example = 10)]
    pub stock_quantity: i32,
    #[validate(length(max = 100, message = "Category cannot exceed 100 characters"))]
    #[schema(example = "Home")]
    pub category: Option<String>,
    #[validate(length(max = 50, message = "SKU cannot exceed 50 characters"))]
    #[schema(example = "LMP-001")]
    pub sku: Option<String>,
}

impl From<CreateProductRequest> for NewCatalogEntry {
    fn from(request: CreateProductRequest) -> Self {
        NewCatalogEntry {
            name: request.name,
            description: request.description,
            price: request.price,
            stock_quantity: request.stock_quantity,
            category: request.category,
            sku: request.sku,
        }
    }
}

/// Partial product update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: Option<i32>,
    #[validate(length(max = 100, message = "Category cannot exceed 100 characters"))]
    pub category: Option<String>,
    #[validate(length(max = 50, message = "SKU cannot exceed 50 characters"))]
    pub sku: Option<String>,
}

impl From<UpdateProductRequest> for UpdateCatalogEntry {
    fn from(request: UpdateProductRequest) -> Self {
        UpdateCatalogEntry {
            name: request.name,
            description: request.description,
            price: request.price,
            stock_quantity: request.stock_quantity,
            category: request.category,
            sku: request.sku,
        }
    }
}

/// Id of a newly created product
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreatedResponse {
    pub product_id: Uuid,
}

/// Create product routes. Reads are public; writes need a bearer token.
pub fn product_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product));

    let protected = Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}

/// List active products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductListParams),
    responses(
        (status = 200, description = "One page of products", body = CatalogPage)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<ServiceResult<CatalogPage>> {
    let page = state.product_service.get_products(params.into()).await?;
    Ok(ServiceResult::success(page))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductCreatedResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "SKU already exists")
    )
)]
pub async fn create_product(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<Created<ProductCreatedResponse>> {
    let product_id = state
        .product_service
        .create_product(payload.into(), current_user.id)
        .await?;

    Ok(Created(ProductCreatedResponse { product_id }))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 501, description = "Not implemented yet")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ServiceResult<CatalogEntryView>> {
    let product = state.product_service.get_product(id).await?;
    Ok(ServiceResult::success(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 501, description = "Not implemented yet")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateProductRequest>,
) -> AppResult<ServiceResult<()>> {
    state.product_service.update_product(id, payload.into()).await?;
    Ok(ServiceResult::message("Product updated successfully"))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 401, description = "Unauthorized"),
        (status = 501, description = "Not implemented yet")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ServiceResult<()>> {
    state.product_service.delete_product(id).await?;
    Ok(ServiceResult::message("Product deleted successfully"))
}
