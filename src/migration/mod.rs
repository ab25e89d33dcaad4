//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_pipelines;
mod m20260815_000002_create_builds;
mod m20260815_000003_create_metrics;
mod m20260815_000004_create_alerts;
mod m20260815_000005_create_configurations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_pipelines::Migration),
            Box::new(m20260815_000002_create_builds::Migration),
            Box::new(m20260815_000003_create_metrics::Migration),
            Box::new(m20260815_000004_create_alerts::Migration),
            Box::new(m20260815_000005_create_configurations::Migration),
        ]
    }
}
