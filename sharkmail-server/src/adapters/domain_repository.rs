//! `SeaORM` domain repository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use sharkmail_core::error::{CoreError, CoreResult};
use sharkmail_core::traits::DomainRepository;
use sharkmail_core::types::{Domain, DomainStatus, WarmingStatus};

use crate::entities::domains::{ActiveModel, Column, Entity, Model};

use super::db_err;

/// Domain repository backed by the `domains` table.
pub struct DatabaseDomainRepository {
    db: DatabaseConnection,
}

impl DatabaseDomainRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn parse_status(value: &str) -> CoreResult<DomainStatus> {
    match value {
        "pending" => Ok(DomainStatus::Pending),
        "active" => Ok(DomainStatus::Active),
        "error" => Ok(DomainStatus::Error),
        other => Err(CoreError::SerializationError(format!(
            "Unknown domain status: {other}"
        ))),
    }
}

fn status_str(status: DomainStatus) -> &'static str {
    match status {
        DomainStatus::Pending => "pending",
        DomainStatus::Active => "active",
        DomainStatus::Error => "error",
    }
}

fn parse_warming_status(value: &str) -> CoreResult<WarmingStatus> {
    match value {
        "not_enabled" => Ok(WarmingStatus::NotEnabled),
        "pending" => Ok(WarmingStatus::Pending),
        "verified" => Ok(WarmingStatus::Verified),
        other => Err(CoreError::SerializationError(format!(
            "Unknown warming status: {other}"
        ))),
    }
}

fn warming_status_str(status: WarmingStatus) -> &'static str {
    match status {
        WarmingStatus::NotEnabled => "not_enabled",
        WarmingStatus::Pending => "pending",
        WarmingStatus::Verified => "verified",
    }
}

fn model_to_domain(model: Model) -> CoreResult<Domain> {
    Ok(Domain {
        id: model.id,
        user_id: model.user_id,
        domain_name: model.domain_name,
        status: parse_status(&model.status)?,
        zone_id: model.zone_id,
        dns_configured: model.dns_configured,
        email_routing_enabled: model.email_routing_enabled,
        forward_to: model.forward_to,
        warming_enabled: model.warming_enabled,
        warming_status: parse_warming_status(&model.warming_status)?,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn domain_to_active(domain: &Domain) -> ActiveModel {
    ActiveModel {
        id: Set(domain.id.clone()),
        user_id: Set(domain.user_id.clone()),
        domain_name: Set(domain.domain_name.clone()),
        status: Set(status_str(domain.status).to_string()),
        zone_id: Set(domain.zone_id.clone()),
        dns_configured: Set(domain.dns_configured),
        email_routing_enabled: Set(domain.email_routing_enabled),
        forward_to: Set(domain.forward_to.clone()),
        warming_enabled: Set(domain.warming_enabled),
        warming_status: Set(warming_status_str(domain.warming_status).to_string()),
        created_at: Set(domain.created_at),
        updated_at: Set(domain.updated_at),
    }
}

#[async_trait]
impl DomainRepository for DatabaseDomainRepository {
    async fn find_all(&self, user_id: &str) -> CoreResult<Vec<Domain>> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_by_id(&self, user_id: &str, domain_id: &str) -> CoreResult<Option<Domain>> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Id.eq(domain_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_by_name(
        &self,
        user_id: &str,
        domain_name: &str,
    ) -> CoreResult<Option<Domain>> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::DomainName.eq(domain_name))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn insert(&self, domain: &Domain) -> CoreResult<()> {
        domain_to_active(domain)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, domain: &Domain) -> CoreResult<()> {
        domain_to_active(domain)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, user_id: &str, domain_id: &str) -> CoreResult<bool> {
        let result = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Id.eq(domain_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
