//! SeaORM entity definitions for PostgreSQL database.

pub mod alert;
pub mod build;
pub mod configuration;
pub mod metric;
pub mod pipeline;
