//! Catalog repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use common::{AppError, AppResult};
use domain::{CatalogEntry, CatalogQuery};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Entries on one page plus the count before pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSlice {
    pub entries: Vec<CatalogEntry>,
    pub total_count: u64,
}

/// Build the message for a SKU collision.
pub fn sku_conflict_message(sku: &str) -> String {
    format!("SKU '{}' already exists", sku)
}

/// Catalog repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Active entries matching every filter, ordered by name, paged
    async fn query(&self, query: &CatalogQuery) -> AppResult<CatalogSlice>;

    /// Find an entry (active or not) by SKU
    async fn find_by_sku(&self, sku: &str) -> AppResult<Option<CatalogEntry>>;

    /// Persist a new entry. A SKU index violation surfaces as `Conflict`.
    async fn insert(&self, entry: &CatalogEntry) -> AppResult<()>;
}

/// Concrete implementation of CatalogRepository
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Translate filters into a WHERE clause over active rows.
fn filter_condition(query: &CatalogQuery) -> Condition {
    let mut condition = Condition::all().add(product::Column::IsActive.eq(true));

    if let Some(category) = query.category() {
        condition = condition.add(product::Column::Category.eq(category));
    }
    if let Some(term) = query.search_term() {
        condition = condition.add(
            Condition::any()
                .add(product::Column::Name.contains(term))
                .add(product::Column::Description.contains(term)),
        );
    }
    if let Some(min_price) = query.min_price() {
        condition = condition.add(product::Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price() {
        condition = condition.add(product::Column::Price.lte(max_price));
    }

    condition
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn query(&self, query: &CatalogQuery) -> AppResult<CatalogSlice> {
        let select = ProductEntity::find().filter(filter_condition(query));

        let total_count = select.clone().count(&self.db).await?;

        let entries = select
            .order_by_asc(product::Column::Name)
            .offset(query.offset())
            .limit(query.page_size())
            .all(&self.db)
            .await?
            .into_iter()
            .map(CatalogEntry::from)
            .collect();

        Ok(CatalogSlice {
            entries,
            total_count,
        })
    }

    async fn find_by_sku(&self, sku: &str) -> AppResult<Option<CatalogEntry>> {
        let result = ProductEntity::find()
            .filter(product::Column::Sku.eq(sku))
            .one(&self.db)
            .await?;

        Ok(result.map(CatalogEntry::from))
    }

    async fn insert(&self, entry: &CatalogEntry) -> AppResult<()> {
        ActiveModel::from(entry)
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, entry.sku.as_deref()))?;
        Ok(())
    }
}

fn map_insert_error(err: DbErr, sku: Option<&str>) -> AppError {
    match (err.sql_err(), sku) {
        (Some(SqlErr::UniqueConstraintViolation(_)), Some(sku)) => {
            AppError::conflict(sku_conflict_message(sku))
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Decimal;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(query: &CatalogQuery) -> String {
        ProductEntity::find()
            .filter(filter_condition(query))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_only_active_rows_without_filters() {
        let sql = sql(&CatalogQuery::new(1, 10, None, None, None, None));
        assert!(sql.contains(r#""is_active""#));
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn test_search_matches_name_or_description() {
        let query = CatalogQuery::new(1, 10, None, Some("lamp".to_string()), None, None);
        let sql = sql(&query);

        assert!(sql.contains(r#""name" LIKE"#));
        assert!(sql.contains(r#""description" LIKE"#));
        assert!(sql.contains("%lamp%"));
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_category_and_price_bounds() {
        let query = CatalogQuery::new(
            1,
            10,
            Some("Books".to_string()),
            None,
            Some(Decimal::new(10, 0)),
            Some(Decimal::new(20, 0)),
        );
        let sql = sql(&query);

        assert!(sql.contains(r#""category" = 'Books'"#));
        assert!(sql.contains(r#""price" >="#));
        assert!(sql.contains(r#""price" <="#));
    }

    #[test]
    fn test_sku_conflict_message() {
        assert_eq!(sku_conflict_message("BK-001"), "SKU 'BK-001' already exists");
    }
}
