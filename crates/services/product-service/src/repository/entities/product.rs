//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::CatalogEntry;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    #[sea_orm(unique)]
    pub sku: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for CatalogEntry {
    fn from(model: Model) -> Self {
        CatalogEntry {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock_quantity: model.stock_quantity,
            category: model.category,
            sku: model.sku,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&CatalogEntry> for ActiveModel {
    fn from(entry: &CatalogEntry) -> Self {
        ActiveModel {
            id: Set(entry.id),
            name: Set(entry.name.clone()),
            description: Set(entry.description.clone()),
            price: Set(entry.price),
            stock_quantity: Set(entry.stock_quantity),
            category: Set(entry.category.clone()),
            sku: Set(entry.sku.clone()),
            is_active: Set(entry.is_active),
            created_at: Set(entry.created_at),
            updated_at: Set(entry.updated_at),
        }
    }
}
