//! Storage abstraction traits

mod domain_repository;
mod warming_store;

pub use domain_repository::DomainRepository;
pub use warming_store::{WarmingActivityRepository, WarmingSessionRepository};
