use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250115_000001_create_users_table::Users;

static FK_SESSION_USER_ID: &str = "fk_warming_sessions_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarmingSessions::Table)
                    .if_not_exists()
                    // One session row per account
                    .col(string(WarmingSessions::UserId).primary_key())
                    .col(string(WarmingSessions::Status))
                    .col(integer(WarmingSessions::EmailsPerDay))
                    .col(double(WarmingSessions::AiFrequency))
                    .col(double(WarmingSessions::ReplyProbability))
                    .col(big_integer(WarmingSessions::EmailsSentTotal))
                    .col(big_integer(WarmingSessions::AiEmailsSent))
                    .col(big_integer(WarmingSessions::RepliesSent))
                    .col(timestamp_with_time_zone(WarmingSessions::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SESSION_USER_ID)
                    .from_tbl(WarmingSessions::Table)
                    .from_col(WarmingSessions::UserId)
                    .to_tbl(Users::Table)
                    .to_col(Users::Id)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WarmingSessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WarmingSessions {
    Table,
    UserId,
    Status,
    EmailsPerDay,
    AiFrequency,
    ReplyProbability,
    EmailsSentTotal,
    AiEmailsSent,
    RepliesSent,
    UpdatedAt,
}
