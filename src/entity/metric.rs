//! Daily metric snapshot entity for SeaORM.
//!
//! One row per `(date, tool)` pair, enforced by a unique index.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "metrics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: Date,
    pub tool: String,
    pub total_pipelines: i32,
    pub total_builds: i32,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub average_build_time_secs: f64,
    pub average_pipeline_time_secs: f64,
    pub deployments: i32,
    pub deployment_success_rate: f64,
    pub code_coverage: f64,
    pub test_pass_rate: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
