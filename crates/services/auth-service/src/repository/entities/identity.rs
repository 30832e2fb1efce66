//! Identity database entity for SeaORM.

use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use common::AppError;
use domain::Identity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "identities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    /// JSON array of role labels
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for Identity {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let roles: BTreeSet<String> = serde_json::from_value(model.roles).map_err(|e| {
            AppError::internal(format!("Malformed roles for identity {}: {}", model.id, e))
        })?;

        Ok(Identity {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            is_active: model.is_active,
            roles,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<&Identity> for ActiveModel {
    fn from(identity: &Identity) -> Self {
        ActiveModel {
            id: Set(identity.id),
            username: Set(identity.username.clone()),
            email: Set(identity.email.clone()),
            password_hash: Set(identity.password_hash.clone()),
            first_name: Set(identity.first_name.clone()),
            last_name: Set(identity.last_name.clone()),
            is_active: Set(identity.is_active),
            roles: Set(serde_json::json!(identity.roles)),
            created_at: Set(identity.created_at),
            updated_at: Set(identity.updated_at),
        }
    }
}
