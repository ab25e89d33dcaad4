//! Migration: Create metrics table.
//!
//! One daily aggregate snapshot per tool; the `(date, tool)` pair is unique.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE metrics (
                    id UUID PRIMARY KEY,
                    date DATE NOT NULL,
                    tool VARCHAR(20) NOT NULL
                        CHECK (tool IN ('github', 'gitlab', 'jenkins')),
                    total_pipelines INTEGER NOT NULL DEFAULT 0,
                    total_builds INTEGER NOT NULL DEFAULT 0,
                    success_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
                    failure_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
                    average_build_time_secs DOUBLE PRECISION NOT NULL DEFAULT 0,
                    average_pipeline_time_secs DOUBLE PRECISION NOT NULL DEFAULT 0,
                    deployments INTEGER NOT NULL DEFAULT 0,
                    deployment_success_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
                    code_coverage DOUBLE PRECISION NOT NULL DEFAULT 0,
                    test_pass_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- One snapshot per tool per day
                CREATE UNIQUE INDEX idx_metrics_date_tool ON metrics(date, tool);

                -- Range scans by recency
                CREATE INDEX idx_metrics_date ON metrics(date DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS metrics CASCADE;")
            .await?;

        Ok(())
    }
}
