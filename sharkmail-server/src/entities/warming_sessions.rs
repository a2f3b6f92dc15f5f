use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warming_sessions")]
pub struct Model {
    /// One session per account
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub status: String,
    pub emails_per_day: i32,
    pub ai_frequency: f64,
    pub reply_probability: f64,
    pub emails_sent_total: i64,
    pub ai_emails_sent: i64,
    pub replies_sent: i64,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
