pub use sea_orm_migration::prelude::*;

mod m20251017_000001_create_users;
mod m20251017_000002_create_patients;
mod m20251017_000003_create_doctors;
mod m20251017_000004_create_mappings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_create_users::Migration),
            Box::new(m20251017_000002_create_patients::Migration),
            Box::new(m20251017_000003_create_doctors::Migration),
            Box::new(m20251017_000004_create_mappings::Migration),
        ]
    }
}
