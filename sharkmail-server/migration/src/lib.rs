pub use sea_orm_migration::prelude::*;

mod m20250115_000001_create_users_table;
mod m20250115_000002_create_domains_table;
mod m20250115_000003_create_warming_sessions_table;
mod m20250115_000004_create_warming_emails_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250115_000001_create_users_table::Migration),
            Box::new(m20250115_000002_create_domains_table::Migration),
            Box::new(m20250115_000003_create_warming_sessions_table::Migration),
            Box::new(m20250115_000004_create_warming_emails_table::Migration),
        ]
    }
}
