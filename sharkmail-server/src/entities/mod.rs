//! `SeaORM` entity definitions.

pub mod domains;
pub mod users;
pub mod warming_emails;
pub mod warming_sessions;
