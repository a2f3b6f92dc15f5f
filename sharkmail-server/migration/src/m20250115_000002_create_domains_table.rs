use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250115_000001_create_users_table::Users;

static FK_DOMAIN_USER_ID: &str = "fk_domains_user_id";
static IDX_DOMAIN_USER_NAME: &str = "idx_domains_user_id_domain_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Domains::Table)
                    .if_not_exists()
                    .col(string(Domains::Id).primary_key())
                    .col(string(Domains::UserId))
                    .col(string(Domains::DomainName))
                    .col(string(Domains::Status))
                    .col(string_null(Domains::ZoneId))
                    .col(boolean(Domains::DnsConfigured))
                    .col(boolean(Domains::EmailRoutingEnabled))
                    .col(string_null(Domains::ForwardTo))
                    .col(boolean(Domains::WarmingEnabled))
                    .col(string(Domains::WarmingStatus))
                    .col(timestamp_with_time_zone(Domains::CreatedAt))
                    .col(timestamp_with_time_zone(Domains::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DOMAIN_USER_ID)
                    .from_tbl(Domains::Table)
                    .from_col(Domains::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .to_owned(),
            )
            .await?;

        // The import dedupe key: one domain name per account
        manager
            .create_index(
                Index::create()
                    .name(IDX_DOMAIN_USER_NAME)
                    .table(Domains::Table)
                    .col(Domains::UserId)
                    .col(Domains::DomainName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Domains::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Domains {
    Table,
    Id,
    UserId,
    DomainName,
    Status,
    ZoneId,
    DnsConfigured,
    EmailRoutingEnabled,
    ForwardTo,
    WarmingEnabled,
    WarmingStatus,
    CreatedAt,
    UpdatedAt,
}
