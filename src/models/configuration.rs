//! Configuration record models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request to create a configuration record.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateConfigurationRequest {
    pub name: String,
    /// Open set in the UI: "integration", "notification", "build",
    /// "pipeline", "security", ...
    pub config_type: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    pub environment: String,
    pub modified_by: String,
}

/// Request to update a configuration record. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateConfigurationRequest {
    pub config_type: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub modified_by: Option<String>,
}

/// Configuration record returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfigurationResponse {
    pub id: Uuid,
    pub name: String,
    pub config_type: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub environment: String,
    pub modified_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Configuration list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfigurationListResponse {
    pub configurations: Vec<ConfigurationResponse>,
    pub total: u64,
}

/// Query parameters for listing configuration records.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListConfigurationsQuery {
    /// Filter by type (exact match).
    #[serde(default)]
    pub config_type: Option<String>,
    /// Filter by environment (exact match).
    #[serde(default)]
    pub environment: Option<String>,
}
