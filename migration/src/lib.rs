pub use sea_orm_migration::prelude::*;

mod m20250512_090100_create_table_users;
mod m20250512_094500_create_catalog_tables;
mod m20250513_101500_create_table_application;
mod m20250514_083000_create_table_lesson_progress;
mod m20250514_153000_create_table_submission;
mod m20250515_110000_create_table_certificate;
mod m20250601_120000_add_streak_columns_table_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250512_090100_create_table_users::Migration),
            Box::new(m20250512_094500_create_catalog_tables::Migration),
            Box::new(m20250513_101500_create_table_application::Migration),
            Box::new(m20250514_083000_create_table_lesson_progress::Migration),
            Box::new(m20250514_153000_create_table_submission::Migration),
            Box::new(m20250515_110000_create_table_certificate::Migration),
            Box::new(m20250601_120000_add_streak_columns_table_users::Migration),
        ]
    }
}
