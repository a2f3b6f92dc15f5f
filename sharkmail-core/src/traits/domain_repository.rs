//! Domain persistence abstraction

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Domain;

/// Domain repository trait.
///
/// All queries are scoped to one account: a `user_id` never sees another
/// tenant's rows.
///
/// Platform implementation:
/// - Actix-Web: `DatabaseDomainRepository` (`SeaORM`)
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// All domains for an account, oldest first.
    async fn find_all(&self, user_id: &str) -> CoreResult<Vec<Domain>>;

    /// Look up a domain by id within an account.
    async fn find_by_id(&self, user_id: &str, domain_id: &str) -> CoreResult<Option<Domain>>;

    /// Look up a domain by name within an account (the import dedupe key).
    async fn find_by_name(&self, user_id: &str, domain_name: &str)
        -> CoreResult<Option<Domain>>;

    /// Insert a new domain.
    async fn insert(&self, domain: &Domain) -> CoreResult<()>;

    /// Persist changes to an existing domain.
    async fn update(&self, domain: &Domain) -> CoreResult<()>;

    /// Delete a domain. Returns whether a row was removed.
    async fn delete(&self, user_id: &str, domain_id: &str) -> CoreResult<bool>;
}
