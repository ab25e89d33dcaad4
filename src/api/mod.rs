//! API endpoint modules.

pub mod alerts;
pub mod builds;
pub mod configurations;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod pipelines;

pub use alerts::configure_routes as configure_alert_routes;
pub use builds::configure_routes as configure_build_routes;
pub use configurations::configure_routes as configure_configuration_routes;
pub use dashboard::configure_routes as configure_dashboard_routes;
pub use health::configure_health_routes;
pub use metrics::configure_routes as configure_metric_routes;
pub use openapi::ApiDoc;
pub use pipelines::configure_routes as configure_pipeline_routes;
