//! `SeaORM` warming session repository
//!
//! The session is a single row per account. Start/stop race through
//! conditional `UPDATE ... WHERE status IN (...)` statements, so the
//! database decides exactly one winner.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ExprTrait, QueryFilter, Set,
};

use sharkmail_core::error::{CoreError, CoreResult};
use sharkmail_core::traits::WarmingSessionRepository;
use sharkmail_core::types::{
    SessionStatus, WarmingConfig, WarmingCounters, WarmingSession,
};

use crate::entities::warming_sessions::{ActiveModel, Column, Entity, Model};

use super::db_err;

/// Warming session repository backed by the `warming_sessions` table.
pub struct DatabaseWarmingSessionRepository {
    db: DatabaseConnection,
}

impl DatabaseWarmingSessionRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `not_configured` is represented by the absence of a row, so only the two
/// configured states are ever stored.
fn status_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::NotConfigured | SessionStatus::Inactive => "inactive",
        SessionStatus::Active => "active",
    }
}

fn parse_status(value: &str) -> CoreResult<SessionStatus> {
    match value {
        "inactive" => Ok(SessionStatus::Inactive),
        "active" => Ok(SessionStatus::Active),
        other => Err(CoreError::SerializationError(format!(
            "Unknown session status: {other}"
        ))),
    }
}

fn model_to_session(model: Model) -> CoreResult<WarmingSession> {
    Ok(WarmingSession {
        status: parse_status(&model.status)?,
        config: WarmingConfig {
            emails_per_day: u32::try_from(model.emails_per_day).unwrap_or(1),
            ai_frequency: model.ai_frequency,
            reply_probability: model.reply_probability,
        },
        counters: WarmingCounters {
            emails_sent_total: u64::try_from(model.emails_sent_total).unwrap_or(0),
            ai_emails_sent: u64::try_from(model.ai_emails_sent).unwrap_or(0),
            replies_sent: u64::try_from(model.replies_sent).unwrap_or(0),
        },
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl WarmingSessionRepository for DatabaseWarmingSessionRepository {
    async fn find(&self, user_id: &str) -> CoreResult<Option<WarmingSession>> {
        Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_session)
            .transpose()
    }

    async fn create_if_absent(&self, user_id: &str, session: &WarmingSession) -> CoreResult<()> {
        let active = ActiveModel {
            user_id: Set(user_id.to_string()),
            status: Set(status_str(session.status).to_string()),
            emails_per_day: Set(i32::try_from(session.config.emails_per_day).unwrap_or(1)),
            ai_frequency: Set(session.config.ai_frequency),
            reply_probability: Set(session.config.reply_probability),
            emails_sent_total: Set(i64::try_from(session.counters.emails_sent_total).unwrap_or(0)),
            ai_emails_sent: Set(i64::try_from(session.counters.ai_emails_sent).unwrap_or(0)),
            replies_sent: Set(i64::try_from(session.counters.replies_sent).unwrap_or(0)),
            updated_at: Set(session.updated_at),
        };

        // Unique key on user_id makes concurrent creation race to one row
        let result = Entity::insert(active)
            .on_conflict(OnConflict::column(Column::UserId).do_nothing().to_owned())
            .exec(&self.db)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn update_config(&self, user_id: &str, config: &WarmingConfig) -> CoreResult<()> {
        Entity::update_many()
            .filter(Column::UserId.eq(user_id))
            .col_expr(
                Column::EmailsPerDay,
                Expr::value(i32::try_from(config.emails_per_day).unwrap_or(1)),
            )
            .col_expr(Column::AiFrequency, Expr::value(config.ai_frequency))
            .col_expr(
                Column::ReplyProbability,
                Expr::value(config.reply_probability),
            )
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn transition_status(
        &self,
        user_id: &str,
        from: &[SessionStatus],
        to: SessionStatus,
    ) -> CoreResult<bool> {
        let from_strs: Vec<&str> = from.iter().map(|s| status_str(*s)).collect();

        let result = Entity::update_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Status.is_in(from_strs))
            .col_expr(Column::Status, Expr::value(status_str(to)))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn increment_counters(&self, user_id: &str, delta: WarmingCounters) -> CoreResult<()> {
        Entity::update_many()
            .filter(Column::UserId.eq(user_id))
            .col_expr(
                Column::EmailsSentTotal,
                Expr::col(Column::EmailsSentTotal)
                    .add(i64::try_from(delta.emails_sent_total).unwrap_or(0)),
            )
            .col_expr(
                Column::AiEmailsSent,
                Expr::col(Column::AiEmailsSent)
                    .add(i64::try_from(delta.ai_emails_sent).unwrap_or(0)),
            )
            .col_expr(
                Column::RepliesSent,
                Expr::col(Column::RepliesSent)
                    .add(i64::try_from(delta.replies_sent).unwrap_or(0)),
            )
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn active_user_ids(&self) -> CoreResult<Vec<String>> {
        Ok(Entity::find()
            .filter(Column::Status.eq("active"))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|m| m.user_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        assert_eq!(parse_status("inactive").unwrap(), SessionStatus::Inactive);
        assert_eq!(parse_status("active").unwrap(), SessionStatus::Active);
        assert!(parse_status("error").is_err());
    }

    #[test]
    fn not_configured_stores_as_inactive() {
        assert_eq!(status_str(SessionStatus::NotConfigured), "inactive");
    }
}
