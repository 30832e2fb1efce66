//! Migration: Create identities table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Identities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Identities::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Identities::Username).string_len(50).not_null())
                    .col(ColumnDef::new(Identities::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Identities::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Identities::FirstName).string_len(50).null())
                    .col(ColumnDef::new(Identities::LastName).string_len(50).null())
                    .col(
                        ColumnDef::new(Identities::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Identities::Roles).json_binary().not_null())
                    .col(
                        ColumnDef::new(Identities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Identities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique indexes are the authoritative duplicate check at registration
        manager
            .create_index(
                Index::create()
                    .name("idx_identities_username")
                    .table(Identities::Table)
                    .col(Identities::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_identities_email")
                    .table(Identities::Table)
                    .col(Identities::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Identities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Identities {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    IsActive,
    Roles,
    CreatedAt,
    UpdatedAt,
}
