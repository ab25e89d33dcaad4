//! Migration: Create alerts table.
//!
//! An alert references a source entity by kind + id and carries severity
//! and acknowledgement state.

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
                CREATE TABLE alerts (
                    id UUID PRIMARY KEY,
                    kind VARCHAR(20) NOT NULL
                        CHECK (kind IN ('error', 'warning', 'info', 'success')),
                    severity VARCHAR(20) NOT NULL
                        CHECK (severity IN ('low', 'medium', 'high', 'critical')),
                    message TEXT NOT NULL,
                    description TEXT,
                    source VARCHAR(20) NOT NULL
                        CHECK (source IN ('pipeline', 'build', 'system', 'security', 'deployment')),
                    source_id VARCHAR(100) NOT NULL,
                    source_name VARCHAR(200) NOT NULL,
                    environment VARCHAR(50) NOT NULL,
                    tags JSONB NOT NULL DEFAULT '[]'::jsonb,
                    status VARCHAR(20) NOT NULL DEFAULT 'active'
                        CHECK (status IN ('active', 'resolved')),
                    acknowledged BOOLEAN NOT NULL DEFAULT FALSE,
                    acknowledged_by VARCHAR(200),
                    acknowledged_at TIMESTAMPTZ,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Status listings by recency
                CREATE INDEX idx_alerts_status_created_at ON alerts(status, created_at DESC);

                -- Alerts for a source entity
                CREATE INDEX idx_alerts_source ON alerts(source, source_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS alerts CASCADE;")
            .await?;

        Ok(())
    }
}
