use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle enums are stored as their snake_case wire strings; the adapter
/// converts to and from the core types.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "domains")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub domain_name: String,
    pub status: String,
    pub zone_id: Option<String>,
    pub dns_configured: bool,
    pub email_routing_enabled: bool,
    pub forward_to: Option<String>,
    pub warming_enabled: bool,
    pub warming_status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
