//! `SeaORM` warming activity log repository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use sharkmail_core::error::CoreResult;
use sharkmail_core::traits::WarmingActivityRepository;
use sharkmail_core::types::WarmingEmail;

use crate::entities::warming_emails::{ActiveModel, Column, Entity, Model};

use super::db_err;

/// Activity log repository backed by the `warming_emails` table.
pub struct DatabaseWarmingActivityRepository {
    db: DatabaseConnection,
}

impl DatabaseWarmingActivityRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_email(model: Model) -> WarmingEmail {
    WarmingEmail {
        from_email: model.from_email,
        to_email: model.to_email,
        subject: model.subject,
        is_ai: model.is_ai,
        is_reply: model.is_reply,
        sent_at: model.sent_at,
    }
}

#[async_trait]
impl WarmingActivityRepository for DatabaseWarmingActivityRepository {
    async fn append(&self, user_id: &str, email: &WarmingEmail) -> CoreResult<()> {
        ActiveModel {
            id: NotSet,
            user_id: Set(user_id.to_string()),
            from_email: Set(email.from_email.clone()),
            to_email: Set(email.to_email.clone()),
            subject: Set(email.subject.clone()),
            is_ai: Set(email.is_ai),
            is_reply: Set(email.is_reply),
            sent_at: Set(email.sent_at),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn recent(&self, user_id: &str, limit: usize) -> CoreResult<Vec<WarmingEmail>> {
        Ok(Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::SentAt)
            .order_by_desc(Column::Id)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_email)
            .collect())
    }
}
