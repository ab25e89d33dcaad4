//! Migration: Create pipelines table and shared trigger function.
//!
//! A pipeline is a named CI/CD workflow bound to a repository and branch.
//! Also creates the shared updated_at trigger function.

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
                -- Shared trigger function for updated_at
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                -- Pipelines table
                CREATE TABLE pipelines (
                    id UUID PRIMARY KEY,
                    pipeline_id VARCHAR(100) NOT NULL,
                    name VARCHAR(200) NOT NULL,
                    description TEXT,
                    repository VARCHAR(300) NOT NULL,
                    branch VARCHAR(200) NOT NULL,
                    tool VARCHAR(20) NOT NULL
                        CHECK (tool IN ('github', 'gitlab', 'jenkins')),
                    status VARCHAR(20) NOT NULL DEFAULT 'draft'
                        CHECK (status IN ('active', 'inactive', 'draft')),
                    trigger_type VARCHAR(20) NOT NULL
                        CHECK (trigger_type IN ('push', 'pr', 'manual', 'schedule')),
                    environment VARCHAR(50) NOT NULL,
                    last_status VARCHAR(20)
                        CHECK (last_status IN ('success', 'failure', 'running', 'pending', 'cancelled')),
                    started_at TIMESTAMPTZ,
                    average_duration_secs DOUBLE PRECISION,
                    success_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
                    total_runs INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Unique business key
                CREATE UNIQUE INDEX idx_pipelines_pipeline_id ON pipelines(pipeline_id);

                -- Filtering by tool and status
                CREATE INDEX idx_pipelines_tool_status ON pipelines(tool, status);

                -- Listing by recency
                CREATE INDEX idx_pipelines_started_at ON pipelines(started_at DESC);

                -- Repository/branch lookups
                CREATE INDEX idx_pipelines_repository_branch ON pipelines(repository, branch);

                -- Trigger to update updated_at
                CREATE TRIGGER update_pipelines_updated_at
                    BEFORE UPDATE ON pipelines
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_pipelines_updated_at ON pipelines;
                DROP TABLE IF EXISTS pipelines CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
