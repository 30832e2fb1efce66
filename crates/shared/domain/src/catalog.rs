//! Catalog entry entity, query normalisation and the page envelope.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_PAGE_SIZE, MAX_PRODUCT_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// A sellable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Create a new active entry from validated input.
    pub fn create(input: NewCatalogEntry) -> DomainResult<Self> {
        input.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            category: input.category,
            sku: input.sku,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        })
    }
}

/// Data required to create a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCatalogEntry {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub sku: Option<String>,
}

impl NewCatalogEntry {
    /// Enforce the entry invariants (non-empty name, non-negative price and stock).
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Name is required"));
        }
        if self.name.chars().count() as u64 > MAX_PRODUCT_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Name cannot exceed {} characters",
                MAX_PRODUCT_NAME_LENGTH
            )));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::validation("Price cannot be negative"));
        }
        if self.stock_quantity < 0 {
            return Err(DomainError::validation("Stock quantity cannot be negative"));
        }
        Ok(())
    }
}

/// Partial update of a catalog entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCatalogEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub category: Option<String>,
    pub sku: Option<String>,
}

/// Catalog entry as returned to readers and stored in the query cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CatalogEntry> for CatalogEntryView {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            price: entry.price,
            stock_quantity: entry.stock_quantity,
            category: entry.category,
            sku: entry.sku,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Normalised catalog query parameters.
///
/// Construction clamps the page number to at least 1 and the page size to
/// `1..=MAX_PAGE_SIZE`. Empty filter strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    page_number: u64,
    page_size: u64,
    category: Option<String>,
    search_term: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
}

impl CatalogQuery {
    pub fn new(
        page_number: i64,
        page_size: i64,
        category: Option<String>,
        search_term: Option<String>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> Self {
        Self {
            page_number: page_number.max(1) as u64,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE as i64) as u64,
            category: category.filter(|c| !c.is_empty()),
            search_term: search_term.filter(|s| !s.is_empty()),
            min_price,
            max_price,
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn min_price(&self) -> Option<Decimal> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<Decimal> {
        self.max_price
    }

    /// Number of matching entries to skip, capped at what a SQL `OFFSET` accepts.
    pub fn offset(&self) -> u64 {
        (self.page_number - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }
}

/// One page of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub products: Vec<CatalogEntryView>,
    pub total_count: u64,
    pub page_number: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl CatalogPage {
    /// Create a page for `query` given the entries on it and the pre-pagination count.
    pub fn new(products: Vec<CatalogEntryView>, total_count: u64, query: &CatalogQuery) -> Self {
        Self {
            products,
            total_count,
            page_number: query.page_number(),
            page_size: query.page_size(),
            total_pages: total_pages(total_count, query.page_size()),
        }
    }
}

/// Ceiling of `total_count / page_size`; zero when nothing matches.
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    (total_count + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry() -> NewCatalogEntry {
        NewCatalogEntry {
            name: "Rust in Action".to_string(),
            description: None,
            price: Decimal::new(3999, 2),
            stock_quantity: 5,
            category: Some("Books".to_string()),
            sku: Some("BK-001".to_string()),
        }
    }

    #[test]
    fn test_page_size_clamped() {
        let query = CatalogQuery::new(1, 500, None, None, None, None);
        assert_eq!(query.page_size(), 100);

        let query = CatalogQuery::new(1, 0, None, None, None, None);
        assert_eq!(query.page_size(), 1);

        let query = CatalogQuery::new(1, -3, None, None, None, None);
        assert_eq!(query.page_size(), 1);
    }

    #[test]
    fn test_page_number_clamped() {
        assert_eq!(CatalogQuery::new(0, 10, None, None, None, None).page_number(), 1);
        assert_eq!(CatalogQuery::new(-7, 10, None, None, None, None).page_number(), 1);
        assert_eq!(CatalogQuery::new(4, 10, None, None, None, None).page_number(), 4);
    }

    #[test]
    fn test_offset() {
        let query = CatalogQuery::new(3, 20, None, None, None, None);
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_offset_saturates_for_huge_page_number() {
        let query = CatalogQuery::new(i64::MAX, 100, None, None, None, None);
        assert_eq!(query.page_number(), i64::MAX as u64);
        assert_eq!(query.offset(), i64::MAX as u64);
    }

    #[test]
    fn test_empty_filters_are_absent() {
        let query = CatalogQuery::new(1, 10, Some(String::new()), Some(String::new()), None, None);
        assert_eq!(query.category(), None);
        assert_eq!(query.search_term(), None);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(21, 10), 3);
    }

    #[test]
    fn test_create_entry_is_active() {
        let entry = CatalogEntry::create(new_entry()).unwrap();
        assert!(entry.is_active);
        assert!(entry.updated_at.is_none());
    }

    #[test]
    fn test_negative_values_rejected() {
        let mut negative_price = new_entry();
        negative_price.price = Decimal::new(-1, 0);
        assert!(negative_price.validate().is_err());

        let mut negative_stock = new_entry();
        negative_stock.stock_quantity = -1;
        assert!(negative_stock.validate().is_err());

        let mut blank_name = new_entry();
        blank_name.name = " ".to_string();
        assert!(blank_name.validate().is_err());
    }

    #[test]
    fn test_page_serialization_roundtrip() {
        let entry = CatalogEntry::create(new_entry()).unwrap();
        let query = CatalogQuery::new(1, 10, None, None, None, None);
        let page = CatalogPage::new(vec![entry.into()], 1, &query);

        let bytes = serde_json::to_vec(&page).unwrap();
        let restored: CatalogPage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(restored, page);
    }
}
