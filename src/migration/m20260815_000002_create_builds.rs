//! Migration: Create builds table.
//!
//! A build is one timestamped execution of a pipeline, referencing it
//! by business key.

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
                CREATE TABLE builds (
                    id UUID PRIMARY KEY,
                    build_id VARCHAR(100) NOT NULL,
                    pipeline_id VARCHAR(100) NOT NULL
                        REFERENCES pipelines(pipeline_id) ON DELETE CASCADE,
                    status VARCHAR(20) NOT NULL DEFAULT 'pending'
                        CHECK (status IN ('success', 'failure', 'running', 'pending', 'cancelled')),
                    stage VARCHAR(50) NOT NULL,
                    environment VARCHAR(50) NOT NULL,
                    branch VARCHAR(200) NOT NULL,
                    commit_sha VARCHAR(64) NOT NULL,
                    commit_message TEXT,
                    trigger_type VARCHAR(20) NOT NULL
                        CHECK (trigger_type IN ('push', 'pr', 'manual', 'schedule')),
                    triggered_by VARCHAR(200) NOT NULL,
                    started_at TIMESTAMPTZ NOT NULL,
                    completed_at TIMESTAMPTZ,
                    duration_secs DOUBLE PRECISION,
                    tests_total INTEGER NOT NULL DEFAULT 0,
                    tests_passed INTEGER NOT NULL DEFAULT 0,
                    tests_failed INTEGER NOT NULL DEFAULT 0,
                    tests_skipped INTEGER NOT NULL DEFAULT 0,
                    coverage DOUBLE PRECISION,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Unique business key
                CREATE UNIQUE INDEX idx_builds_build_id ON builds(build_id);

                -- Builds for a pipeline
                CREATE INDEX idx_builds_pipeline_id ON builds(pipeline_id);

                -- Status listings by recency
                CREATE INDEX idx_builds_status_started_at ON builds(status, started_at DESC);

                -- Trigger to update updated_at
                CREATE TRIGGER update_builds_updated_at
                    BEFORE UPDATE ON builds
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
                DROP TRIGGER IF EXISTS update_builds_updated_at ON builds;
                DROP TABLE IF EXISTS builds CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
