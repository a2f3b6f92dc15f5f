//! Database-backed implementations of the core repository traits.

mod domain_repository;
mod warming_activity_repository;
mod warming_session_repository;

pub use domain_repository::DatabaseDomainRepository;
pub use warming_activity_repository::DatabaseWarmingActivityRepository;
pub use warming_session_repository::DatabaseWarmingSessionRepository;

use sea_orm::DbErr;
use sharkmail_core::CoreError;

/// Map a database error into the core error type.
pub(crate) fn db_err(e: DbErr) -> CoreError {
    CoreError::StorageError(e.to_string())
}
