//! Alert domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Pagination, PaginationParams};

/// Alert display kind (maps to the UI banner color).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Error,
    Warning,
    Info,
    Success,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "success" => Some(Self::Success),
            _ => None,
        }
    }
}

/// Alert severity. No numeric ordering is defined between variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// The kind of entity an alert refers to. Closed set; `source_id` resolves
/// within this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSource {
    Pipeline,
    Build,
    System,
    Security,
    Deployment,
}

impl AlertSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::Build => "build",
            Self::System => "system",
            Self::Security => "security",
            Self::Deployment => "deployment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pipeline" => Some(Self::Pipeline),
            "build" => Some(Self::Build),
            "system" => Some(Self::System),
            "security" => Some(Self::Security),
            "deployment" => Some(Self::Deployment),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alert lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// Request to create an alert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAlertRequest {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source: AlertSource,
    pub source_id: String,
    pub source_name: String,
    pub environment: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to acknowledge an alert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AcknowledgeAlertRequest {
    /// Who acknowledged (e.g. an email address).
    pub acknowledged_by: String,
}

/// Alert representation returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertResponse {
    pub id: Uuid,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source: AlertSource,
    pub source_id: String,
    pub source_name: String,
    pub environment: String,
    pub tags: Vec<String>,
    pub status: AlertStatus,
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Alert list response with pagination.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertListResponse {
    pub alerts: Vec<AlertResponse>,
    pub pagination: Pagination,
}

/// Query parameters for listing alerts.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListAlertsQuery {
    #[serde(default)]
    pub status: Option<AlertStatus>,
    #[serde(default)]
    pub severity: Option<AlertSeverity>,
    #[serde(default)]
    pub source: Option<AlertSource>,
    /// Maximum results to return.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Offset for pagination.
    #[serde(default)]
    pub offset: Option<u64>,
}

impl ListAlertsQuery {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Acknowledgement state transition. Once set, acknowledgement never clears:
/// re-acknowledging keeps the original actor and timestamp.
pub fn merge_acknowledgement(
    current: (bool, Option<String>, Option<DateTime<Utc>>),
    by: &str,
    at: DateTime<Utc>,
) -> (bool, Option<String>, Option<DateTime<Utc>>) {
    if current.0 {
        return current;
    }
    (true, Some(by.to_string()), Some(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parses_only_the_five_kinds() {
        for s in ["pipeline", "build", "system", "security", "deployment"] {
            assert!(AlertSource::parse(s).is_some(), "{} should parse", s);
        }
        assert!(AlertSource::parse("webhook").is_none());
        assert!(AlertSource::parse("").is_none());
        assert!(AlertSource::parse("Pipeline").is_none());
    }

    #[test]
    fn test_acknowledgement_is_monotonic() {
        let t0 = Utc::now();
        let first = merge_acknowledgement((false, None, None), "ops@example.com", t0);
        assert_eq!(
            first,
            (true, Some("ops@example.com".to_string()), Some(t0))
        );

        // A second acknowledgement by someone else does not overwrite the first,
        // and nothing ever flips the flag back to false.
        let t1 = t0 + chrono::Duration::minutes(5);
        let second = merge_acknowledgement(first.clone(), "dev@example.com", t1);
        assert_eq!(second, first);
    }

    #[test]
    fn test_severity_round_trips_through_strings() {
        for sev in [
            AlertSeverity::Low,
            AlertSeverity::Medium,
            AlertSeverity::High,
            AlertSeverity::Critical,
        ] {
            assert_eq!(AlertSeverity::parse(sev.as_str()), Some(sev));
        }
        assert!(AlertSeverity::parse("urgent").is_none());
    }
}
