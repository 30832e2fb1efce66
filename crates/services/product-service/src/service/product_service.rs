//! Product service - cached catalog queries and the create path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::repository::{sku_conflict_message, CatalogRepository};
use crate::service::cache_key::{cache_key, products_cache_prefix};
use common::{AppError, AppResult, CacheStore, CacheStoreExt, EventPublisher};
use domain::{
    CatalogEntry, CatalogEntryView, CatalogPage, CatalogQuery, DomainEvent, EventPayload,
    NewCatalogEntry, ProductCreated, UpdateCatalogEntry,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const GET_PRODUCT_NOT_IMPLEMENTED: &str = "GetProductById query not implemented yet";
pub const UPDATE_PRODUCT_NOT_IMPLEMENTED: &str = "UpdateProduct command not implemented yet";
pub const DELETE_PRODUCT_NOT_IMPLEMENTED: &str = "DeleteProduct command not implemented yet";

/// Message carried by a non-conflict insert failure
pub const CREATE_PRODUCT_FAILED: &str = "An error occurred while creating the product";

/// Product service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// One page of active entries, served from cache when possible
    async fn get_products(&self, query: CatalogQuery) -> AppResult<CatalogPage>;

    /// Create an entry and return its id
    async fn create_product(&self, input: NewCatalogEntry, created_by: Uuid) -> AppResult<Uuid>;

    async fn get_product(&self, id: Uuid) -> AppResult<CatalogEntryView>;

    async fn update_product(&self, id: Uuid, changes: UpdateCatalogEntry) -> AppResult<()>;

    async fn delete_product(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of ProductService.
pub struct ProductCatalog {
    catalog: Arc<dyn CatalogRepository>,
    cache: Arc<dyn CacheStore>,
    events: Arc<dyn EventPublisher>,
    cache_ttl: Duration,
}

impl ProductCatalog {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        cache: Arc<dyn CacheStore>,
        events: Arc<dyn EventPublisher>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            catalog,
            cache,
            events,
            cache_ttl,
        }
    }

    /// Drop every cached page. Failures leave stale pages until TTL expiry.
    async fn invalidate_pages(&self) {
        match self.cache.remove_by_prefix(&products_cache_prefix()).await {
            Ok(removed) => debug!(removed, "Product cache invalidated"),
            Err(e) => warn!(error = %e, "Failed to invalidate product cache"),
        }
    }
}

#[async_trait]
impl ProductService for ProductCatalog {
    async fn get_products(&self, query: CatalogQuery) -> AppResult<CatalogPage> {
        let key = cache_key(&query);

        match self.cache.get_json::<CatalogPage>(&key).await {
            Ok(Some(page)) => {
                info!(cache_key = %key, "Returning cached products");
                return Ok(page);
            }
            Ok(None) => debug!(cache_key = %key, "Product cache miss"),
            Err(e) => warn!(cache_key = %key, error = %e, "Cache read failed, querying store"),
        }

        let slice = self.catalog.query(&query).await.map_err(|e| {
            error!(error = ?e, "Failed to query products");
            AppError::internal(format!("Catalog query failed: {}", e))
        })?;

        let products = slice.entries.into_iter().map(CatalogEntryView::from).collect();
        let page = CatalogPage::new(products, slice.total_count, &query);

        if let Err(e) = self.cache.set_json(&key, &page, self.cache_ttl).await {
            warn!(cache_key = %key, error = %e, "Failed to cache products");
        }

        info!(
            count = page.products.len(),
            total = page.total_count,
            "Retrieved products"
        );
        Ok(page)
    }

    async fn create_product(&self, mut input: NewCatalogEntry, created_by: Uuid) -> AppResult<Uuid> {
        info!(product_name = %input.name, "Creating product");

        input.sku = input.sku.filter(|sku| !sku.is_empty());

        if let Some(sku) = input.sku.as_deref() {
            let existing = self.catalog.find_by_sku(sku).await.map_err(|e| {
                error!(sku, error = ?e, "SKU lookup failed");
                AppError::internal(format!("SKU lookup failed: {}", e))
            })?;
            if existing.is_some() {
                warn!(sku, "Product creation failed: SKU already exists");
                return Err(AppError::conflict(sku_conflict_message(sku)));
            }
        }

        let entry = CatalogEntry::create(input)?;

        match self.catalog.insert(&entry).await {
            Ok(()) => {}
            Err(e @ AppError::Conflict(_)) => {
                warn!(error = %e, "Product creation failed at insert");
                return Err(e);
            }
            Err(e) => {
                error!(product_name = %entry.name, error = ?e, "Failed to persist product");
                return Err(AppError::persistence(CREATE_PRODUCT_FAILED));
            }
        }

        self.invalidate_pages().await;

        let event = DomainEvent::new(EventPayload::ProductCreated(ProductCreated {
            product_id: entry.id,
            product_name: entry.name.clone(),
            category: entry.category.clone(),
            price: entry.price,
            created_by_user_id: created_by,
        }));
        if let Err(e) = self.events.publish(&event).await {
            warn!(event_id = %event.id, error = %e, "Failed to publish ProductCreated");
        }

        info!(product_id = %entry.id, product_name = %entry.name, "Product created");
        Ok(entry.id)
    }

    async fn get_product(&self, id: Uuid) -> AppResult<CatalogEntryView> {
        debug!(product_id = %id, "GetProduct requested");
        Err(AppError::not_implemented(GET_PRODUCT_NOT_IMPLEMENTED))
    }

    async fn update_product(&self, id: Uuid, _changes: UpdateCatalogEntry) -> AppResult<()> {
        debug!(product_id = %id, "UpdateProduct requested");
        Err(AppError::not_implemented(UPDATE_PRODUCT_NOT_IMPLEMENTED))
    }

    async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        debug!(product_id = %id, "DeleteProduct requested");
        Err(AppError::not_implemented(DELETE_PRODUCT_NOT_IMPLEMENTED))
    }
}
