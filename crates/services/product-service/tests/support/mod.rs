//! Shared fixtures for product-service integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use uuid::Uuid;

use common::{
    AppError, AppResult, CacheStore, EventPublisher, JwtConfig, JwtKeys, MemoryCache,
};
use domain::{CatalogEntry, CatalogQuery, Decimal, DomainEvent, NewCatalogEntry};
use product_service_lib::repository::{sku_conflict_message, CatalogRepository, CatalogSlice};
use product_service_lib::service::ProductCatalog;

/// Catalog kept in memory, filtering and ordering the way the products table is queried.
#[derive(Default)]
pub struct InMemoryCatalog {
    rows: Mutex<Vec<CatalogEntry>>,
    queries: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryCatalog {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Number of times the store has been asked for a page
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make every subsequent page query fail, as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Seed a row directly, bypassing the service.
    pub fn seed(&self, entry: CatalogEntry) {
        self.rows.lock().unwrap().push(entry);
    }

    fn matches(entry: &CatalogEntry, query: &CatalogQuery) -> bool {
        if !entry.is_active {
            return false;
        }
        if let Some(category) = query.category() {
            if entry.category.as_deref() != Some(category) {
                return false;
            }
        }
        if let Some(term) = query.search_term() {
            let in_name = entry.name.contains(term);
            let in_description = entry
                .description
                .as_deref()
                .is_some_and(|d| d.contains(term));
            if !in_name && !in_description {
                return false;
            }
        }
        if query.min_price().is_some_and(|min| entry.price < min) {
            return false;
        }
        if query.max_price().is_some_and(|max| entry.price > max) {
            return false;
        }
        true
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn query(&self, query: &CatalogQuery) -> AppResult<CatalogSlice> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal("connection refused"));
        }

        let mut matching: Vec<CatalogEntry> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| Self::matches(e, query))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));

        let total_count = matching.len() as u64;
        let entries = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size() as usize)
            .collect();

        Ok(CatalogSlice {
            entries,
            total_count,
        })
    }

    async fn find_by_sku(&self, sku: &str) -> AppResult<Option<CatalogEntry>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.sku.as_deref() == Some(sku))
            .cloned())
    }

    async fn insert(&self, entry: &CatalogEntry) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(sku) = entry.sku.as_deref() {
            if rows.iter().any(|e| e.sku.as_deref() == Some(sku)) {
                return Err(AppError::conflict(sku_conflict_message(sku)));
            }
        }
        rows.push(entry.clone());
        Ok(())
    }
}

/// Publisher that remembers every event.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct Fixture {
    pub service: ProductCatalog,
    pub catalog: Arc<InMemoryCatalog>,
    pub cache: Arc<MemoryCache>,
    pub events: Arc<RecordingPublisher>,
}

pub fn fixture() -> Fixture {
    let catalog = Arc::new(InMemoryCatalog::default());
    let cache = Arc::new(MemoryCache::new());
    let events = Arc::new(RecordingPublisher::default());
    let service = ProductCatalog::new(
        catalog.clone(),
        cache.clone() as Arc<dyn CacheStore>,
        events.clone(),
        Duration::from_secs(1800),
    );

    Fixture {
        service,
        catalog,
        cache,
        events,
    }
}

pub fn new_product(name: &str, price: Decimal, category: Option<&str>, sku: Option<&str>) -> NewCatalogEntry {
    NewCatalogEntry {
        name: name.to_string(),
        description: None,
        price,
        stock_quantity: 5,
        category: category.map(str::to_string),
        sku: sku.map(str::to_string),
    }
}

pub fn entry(name: &str, price: Decimal, category: Option<&str>) -> CatalogEntry {
    CatalogEntry::create(new_product(name, price, category, None)).unwrap()
}

pub fn query(page: i64, size: i64) -> CatalogQuery {
    CatalogQuery::new(page, size, None, None, None, None)
}

pub fn jwt_keys() -> JwtKeys {
    JwtKeys::new(&JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        issuer: "auth-service".to_string(),
        audience: "services".to_string(),
    })
}

/// Access token for `user_id` signed with [`jwt_keys`].
pub fn access_token(user_id: Uuid) -> String {
    let keys = jwt_keys();
    let now = Utc::now();
    let claims = keys.claims_for(
        user_id,
        "alice",
        "alice@example.com",
        vec!["User".to_string()],
        now,
        now + ChronoDuration::minutes(15),
    );
    keys.encode(&claims).unwrap()
}
