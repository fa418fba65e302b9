pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20240501_000001_short_urls;
mod m20240501_000002_click_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240501_000001_short_urls::Migration),
            Box::new(m20240501_000002_click_events::Migration),
        ]
    }
}
