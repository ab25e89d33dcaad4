//! Build entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "builds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Business key, unique.
    pub build_id: String,
    /// Business key of the owning pipeline.
    pub pipeline_id: String,
    pub status: String,
    pub stage: String,
    pub environment: String,
    pub branch: String,
    pub commit_sha: String,
    pub commit_message: Option<String>,
    pub trigger_type: String,
    pub triggered_by: String,
    pub started_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
    pub duration_secs: Option<f64>,
    pub tests_total: i32,
    pub tests_passed: i32,
    pub tests_failed: i32,
    pub tests_skipped: i32,
    pub coverage: Option<f64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pipeline::Entity",
        from = "Column::PipelineId",
        to = "super::pipeline::Column::PipelineId"
    )]
    Pipeline,
}

impl Related<super::pipeline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pipeline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
