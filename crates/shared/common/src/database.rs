//! Database connection and migration management.

use std::collections::HashSet;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr,
    EntityTrait, QueryOrder, Statement,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};
use tracing::info;

use crate::config::DatabaseConfig;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect using pool settings from `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        info!("Database connected");
        Ok(Self { connection })
    }

    /// Connect and apply pending migrations.
    pub async fn connect_and_migrate<M: MigratorTrait>(
        config: &DatabaseConfig,
    ) -> Result<Self, DbErr> {
        let db = Self::connect(config).await?;
        M::up(&db.connection, None).await?;
        info!("Migrations applied");
        Ok(db)
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// List every defined migration with its applied status.
    pub async fn migration_status<M: MigratorTrait>(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(M::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }

    /// Run a migration CLI action.
    pub async fn migrate<M: MigratorTrait>(&self, action: MigrateAction) -> Result<(), DbErr> {
        match action {
            MigrateAction::Up => {
                M::up(&self.connection, None).await?;
                info!("Migrations applied successfully");
            }
            MigrateAction::Down => {
                M::down(&self.connection, Some(1)).await?;
                info!("Rolled back last migration");
            }
            MigrateAction::Status => {
                for (name, applied) in self.migration_status::<M>().await? {
                    let marker = if applied { "[x]" } else { "[ ]" };
                    println!("{} {}", marker, name);
                }
            }
            MigrateAction::Fresh => {
                M::fresh(&self.connection).await?;
                info!("Database reset and migrations applied");
            }
        }
        Ok(())
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
