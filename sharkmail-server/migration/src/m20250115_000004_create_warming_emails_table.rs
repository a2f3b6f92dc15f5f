use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250115_000001_create_users_table::Users;

static FK_EMAIL_USER_ID: &str = "fk_warming_emails_user_id";
static IDX_EMAIL_USER_SENT: &str = "idx_warming_emails_user_id_sent_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarmingEmails::Table)
                    .if_not_exists()
                    .col(pk_auto(WarmingEmails::Id))
                    .col(string(WarmingEmails::UserId))
                    .col(string(WarmingEmails::FromEmail))
                    .col(string(WarmingEmails::ToEmail))
                    .col(string(WarmingEmails::Subject))
                    .col(boolean(WarmingEmails::IsAi))
                    .col(boolean(WarmingEmails::IsReply))
                    .col(timestamp_with_time_zone(WarmingEmails::SentAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EMAIL_USER_ID)
                    .from_tbl(WarmingEmails::Table)
                    .from_col(WarmingEmails::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .to_owned(),
            )
            .await?;

        // Recent-activity reads are newest-first per account
        manager
            .create_index(
                Index::create()
                    .name(IDX_EMAIL_USER_SENT)
                    .table(WarmingEmails::Table)
                    .col(WarmingEmails::UserId)
                    .col(WarmingEmails::SentAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarmingEmails::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WarmingEmails {
    Table,
    Id,
    UserId,
    FromEmail,
    ToEmail,
    Subject,
    IsAi,
    IsReply,
    SentAt,
}
