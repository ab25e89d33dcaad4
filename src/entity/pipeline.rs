//! Pipeline entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pipelines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Business key, unique.
    pub pipeline_id: String,
    pub name: String,
    pub description: Option<String>,
    pub repository: String,
    pub branch: String,
    pub tool: String,
    pub status: String,
    pub trigger_type: String,
    pub environment: String,
    pub last_status: Option<String>,
    pub started_at: Option<DateTimeUtc>,
    pub average_duration_secs: Option<f64>,
    pub success_rate: f64,
    pub total_runs: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::build::Entity")]
    Builds,
}

impl Related<super::build::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Builds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
