//! Demonstration dataset for local development.
//!
//! The seed tool loads this into a fresh database so the dashboard has
//! something to show. Values mirror a small three-pipeline shop with a
//! week of metric history.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    AlertKind, AlertSeverity, AlertSource, CiTool, CreateAlertRequest, CreateBuildRequest,
    CreateConfigurationRequest, CreatePipelineRequest, PipelineStatus, RunStatus, TestCounts,
    TriggerType, UpdatePipelineRequest, UpsertMetricRequest,
};

/// The alert in [`sample_alerts`] that ships pre-acknowledged, keyed by
/// source_id, with the acknowledging actor.
pub const ACKNOWLEDGED_ALERT: (&str, &str) = ("build-node-1", "john.doe@example.com");

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .expect("sample timestamp literal")
}

fn day(s: &str) -> NaiveDate {
    s.parse().expect("sample date literal")
}

/// Three demonstration pipelines.
pub fn sample_pipelines() -> Vec<CreatePipelineRequest> {
    vec![
        CreatePipelineRequest {
            pipeline_id: "pipeline-1".to_string(),
            name: "main-pipeline".to_string(),
            description: Some("Main CI/CD pipeline for the application".to_string()),
            repository: "myapp/frontend".to_string(),
            branch: "main".to_string(),
            tool: CiTool::Github,
            status: PipelineStatus::Active,
            trigger_type: TriggerType::Push,
            environment: "production".to_string(),
        },
        CreatePipelineRequest {
            pipeline_id: "pipeline-2".to_string(),
            name: "feature-pipeline".to_string(),
            description: Some("Pipeline for feature branch testing".to_string()),
            repository: "myapp/backend".to_string(),
            branch: "feature/*".to_string(),
            tool: CiTool::Gitlab,
            status: PipelineStatus::Active,
            trigger_type: TriggerType::Pr,
            environment: "staging".to_string(),
        },
        CreatePipelineRequest {
            pipeline_id: "pipeline-3".to_string(),
            name: "deploy-pipeline".to_string(),
            description: Some("Production deployment pipeline".to_string()),
            repository: "myapp/infrastructure".to_string(),
            branch: "main".to_string(),
            tool: CiTool::Jenkins,
            status: PipelineStatus::Active,
            trigger_type: TriggerType::Manual,
            environment: "production".to_string(),
        },
    ]
}

/// Run history for the demonstration pipelines, keyed by business key.
///
/// Applied after creation since run state is not part of the create request.
pub fn sample_pipeline_runs() -> Vec<(&'static str, UpdatePipelineRequest)> {
    vec![
        (
            "pipeline-1",
            UpdatePipelineRequest {
                last_status: Some(RunStatus::Success),
                started_at: Some(ts("2024-01-15T10:30:00Z")),
                average_duration_secs: Some(312.0),
                success_rate: Some(92.5),
                total_runs: Some(156),
                ..Default::default()
            },
        ),
        (
            "pipeline-2",
            UpdatePipelineRequest {
                last_status: Some(RunStatus::Running),
                started_at: Some(ts("2024-01-15T10:25:00Z")),
                average_duration_secs: Some(486.0),
                success_rate: Some(87.3),
                total_runs: Some(89),
                ..Default::default()
            },
        ),
        (
            "pipeline-3",
            UpdatePipelineRequest {
                last_status: Some(RunStatus::Failure),
                started_at: Some(ts("2024-01-15T10:20:00Z")),
                average_duration_secs: Some(750.0),
                success_rate: Some(78.9),
                total_runs: Some(45),
                ..Default::default()
            },
        ),
    ]
}

/// Three demonstration builds, one per pipeline.
pub fn sample_builds() -> Vec<CreateBuildRequest> {
    vec![
        CreateBuildRequest {
            build_id: "build-1".to_string(),
            pipeline_id: "pipeline-1".to_string(),
            status: RunStatus::Success,
            stage: "deploy".to_string(),
            environment: "production".to_string(),
            branch: "main".to_string(),
            commit_sha: "a1b2c3d4e5f6".to_string(),
            commit_message: Some("feat: Add new authentication system".to_string()),
            trigger_type: TriggerType::Push,
            triggered_by: "john.doe@example.com".to_string(),
            started_at: ts("2024-01-15T10:30:00Z"),
            completed_at: Some(ts("2024-01-15T10:35:00Z")),
            duration_secs: Some(312.0),
            tests: TestCounts {
                total: 156,
                passed: 156,
                failed: 0,
                skipped: 0,
            },
            coverage: Some(89.5),
        },
        CreateBuildRequest {
            build_id: "build-2".to_string(),
            pipeline_id: "pipeline-2".to_string(),
            status: RunStatus::Running,
            stage: "test".to_string(),
            environment: "staging".to_string(),
            branch: "feature/auth".to_string(),
            commit_sha: "b2c3d4e5f6a7".to_string(),
            commit_message: Some("feat: Implement OAuth2 flow".to_string()),
            trigger_type: TriggerType::Pr,
            triggered_by: "jane.smith@example.com".to_string(),
            started_at: ts("2024-01-15T10:25:00Z"),
            completed_at: None,
            duration_secs: None,
            tests: TestCounts {
                total: 89,
                passed: 45,
                failed: 0,
                skipped: 0,
            },
            coverage: None,
        },
        CreateBuildRequest {
            build_id: "build-3".to_string(),
            pipeline_id: "pipeline-3".to_string(),
            status: RunStatus::Failure,
            stage: "deploy".to_string(),
            environment: "production".to_string(),
            branch: "main".to_string(),
            commit_sha: "c3d4e5f6a7b8".to_string(),
            commit_message: Some("feat: Add monitoring infrastructure".to_string()),
            trigger_type: TriggerType::Manual,
            triggered_by: "admin@example.com".to_string(),
            started_at: ts("2024-01-15T10:20:00Z"),
            completed_at: Some(ts("2024-01-15T10:32:00Z")),
            duration_secs: Some(726.0),
            tests: TestCounts::default(),
            coverage: None,
        },
    ]
}

/// Five demonstration alerts across the source kinds.
pub fn sample_alerts() -> Vec<CreateAlertRequest> {
    vec![
        CreateAlertRequest {
            kind: AlertKind::Error,
            severity: AlertSeverity::High,
            message: "Pipeline main-pipeline failed at deploy stage".to_string(),
            description: Some(
                "The deployment stage failed due to insufficient permissions in the production environment."
                    .to_string(),
            ),
            source: AlertSource::Pipeline,
            source_id: "pipeline-1".to_string(),
            source_name: "main-pipeline".to_string(),
            environment: "production".to_string(),
            tags: vec![
                "deployment".to_string(),
                "permissions".to_string(),
                "rbac".to_string(),
            ],
        },
        CreateAlertRequest {
            kind: AlertKind::Warning,
            severity: AlertSeverity::Medium,
            message: "High memory usage detected in build environment".to_string(),
            description: Some(
                "The build environment is experiencing high memory usage (85%+) which may impact build performance."
                    .to_string(),
            ),
            source: AlertSource::System,
            source_id: "build-node-1".to_string(),
            source_name: "Build Node 1".to_string(),
            environment: "staging".to_string(),
            tags: vec![
                "performance".to_string(),
                "memory".to_string(),
                "infrastructure".to_string(),
            ],
        },
        CreateAlertRequest {
            kind: AlertKind::Info,
            severity: AlertSeverity::Low,
            message: "New security patch available for Jenkins".to_string(),
            description: Some(
                "A critical security patch (CVE-2024-1234) is available for Jenkins.".to_string(),
            ),
            source: AlertSource::Security,
            source_id: "jenkins-instance".to_string(),
            source_name: "Jenkins CI Server".to_string(),
            environment: "production".to_string(),
            tags: vec![
                "security".to_string(),
                "jenkins".to_string(),
                "cve".to_string(),
                "patch".to_string(),
            ],
        },
        CreateAlertRequest {
            kind: AlertKind::Success,
            severity: AlertSeverity::Low,
            message: "Pipeline feature-pipeline completed successfully".to_string(),
            description: Some(
                "The feature branch pipeline completed all stages successfully.".to_string(),
            ),
            source: AlertSource::Pipeline,
            source_id: "pipeline-2".to_string(),
            source_name: "feature-pipeline".to_string(),
            environment: "staging".to_string(),
            tags: vec![
                "success".to_string(),
                "feature".to_string(),
                "staging".to_string(),
            ],
        },
        CreateAlertRequest {
            kind: AlertKind::Error,
            severity: AlertSeverity::Critical,
            message: "Database connection timeout in production".to_string(),
            description: Some(
                "The application is experiencing database connection timeouts in production."
                    .to_string(),
            ),
            source: AlertSource::System,
            source_id: "db-cluster-1".to_string(),
            source_name: "Database Cluster".to_string(),
            environment: "production".to_string(),
            tags: vec![
                "database".to_string(),
                "timeout".to_string(),
                "critical".to_string(),
                "production".to_string(),
            ],
        },
    ]
}

/// A week of daily metric snapshots.
pub fn sample_metrics() -> Vec<(NaiveDate, CiTool, UpsertMetricRequest)> {
    // (date, success, failure, running, pending, build mins, pipeline mins)
    let days = [
        ("2024-01-09", 12, 2, 1, 0, 7.2, 13.5),
        ("2024-01-10", 15, 1, 2, 1, 6.8, 12.8),
        ("2024-01-11", 18, 3, 1, 0, 8.1, 14.2),
        ("2024-01-12", 14, 2, 3, 1, 7.9, 15.8),
        ("2024-01-13", 16, 1, 2, 0, 8.3, 16.1),
        ("2024-01-14", 20, 2, 1, 1, 7.7, 14.9),
        ("2024-01-15", 17, 1, 3, 0, 8.5, 15.2),
    ];

    days.into_iter()
        .map(
            |(date, success, failure, running, pending, build_mins, pipeline_mins): (
                &str,
                i32,
                i32,
                i32,
                i32,
                f64,
                f64,
            )| {
                let completed = (success + failure) as f64;
                let success_rate = success as f64 / completed * 100.0;
                (
                    day(date),
                    CiTool::Github,
                    UpsertMetricRequest {
                        total_pipelines: 3,
                        total_builds: success + failure + running + pending,
                        success_rate,
                        failure_rate: 100.0 - success_rate,
                        average_build_time_secs: build_mins * 60.0,
                        average_pipeline_time_secs: pipeline_mins * 60.0,
                        deployments: failure + success / 4,
                        deployment_success_rate: 94.4,
                        code_coverage: 78.9,
                        test_pass_rate: 92.1,
                    },
                )
            },
        )
        .collect()
}

/// Three demonstration configuration records.
pub fn sample_configurations() -> Vec<CreateConfigurationRequest> {
    vec![
        CreateConfigurationRequest {
            name: "GitHub Actions Integration".to_string(),
            config_type: "integration".to_string(),
            category: "CI/CD".to_string(),
            description: Some("Configuration for GitHub Actions webhook integration".to_string()),
            status: "active".to_string(),
            environment: "production".to_string(),
            modified_by: "admin@example.com".to_string(),
        },
        CreateConfigurationRequest {
            name: "Slack Notifications".to_string(),
            config_type: "notification".to_string(),
            category: "Alerts".to_string(),
            description: Some(
                "Slack webhook configuration for pipeline notifications".to_string(),
            ),
            status: "active".to_string(),
            environment: "production".to_string(),
            modified_by: "devops@example.com".to_string(),
        },
        CreateConfigurationRequest {
            name: "Build Environment Settings".to_string(),
            config_type: "build".to_string(),
            category: "Infrastructure".to_string(),
            description: Some(
                "Build environment configuration including resource limits and timeouts"
                    .to_string(),
            ),
            status: "active".to_string(),
            environment: "production".to_string(),
            modified_by: "admin@example.com".to_string(),
        },
    ]
}
