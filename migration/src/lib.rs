pub use sea_orm_migration::prelude::*;

mod columns;
mod m20240301_000001_create_core_tables;
mod m20240302_000002_create_alchemy_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_core_tables::Migration),
            Box::new(m20240302_000002_create_alchemy_tables::Migration),
        ]
    }
}
