//! Migration: Create configurations table.
//!
//! Named setting/integration records, scoped to an environment.

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
                CREATE TABLE configurations (
                    id UUID PRIMARY KEY,
                    name VARCHAR(200) NOT NULL,
                    config_type VARCHAR(50) NOT NULL,
                    category VARCHAR(100) NOT NULL,
                    description TEXT,
                    status VARCHAR(20) NOT NULL DEFAULT 'active',
                    environment VARCHAR(50) NOT NULL,
                    modified_by VARCHAR(200) NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- One record per name per environment
                CREATE UNIQUE INDEX idx_configurations_name_environment
                    ON configurations(name, environment);

                -- Trigger to update updated_at
                CREATE TRIGGER update_configurations_updated_at
                    BEFORE UPDATE ON configurations
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
                DROP TRIGGER IF EXISTS update_configurations_updated_at ON configurations;
                DROP TABLE IF EXISTS configurations CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
