//! Integrity checks for the demonstration dataset.
//!
//! The seed tool loads this data on a fresh database; these tests catch
//! edits that would make seeding fail against the schema constraints.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cicd_dashboard_server::services::sample_data;

    #[test]
    fn test_pipeline_ids_are_unique() {
        let pipelines = sample_data::sample_pipelines();
        let ids: HashSet<_> = pipelines.iter().map(|p| p.pipeline_id.as_str()).collect();
        assert_eq!(ids.len(), pipelines.len());
    }

    #[test]
    fn test_every_build_references_a_seeded_pipeline() {
        let pipelines: HashSet<_> = sample_data::sample_pipelines()
            .into_iter()
            .map(|p| p.pipeline_id)
            .collect();

        let builds = sample_data::sample_builds();
        assert!(!builds.is_empty());

        for build in &builds {
            assert!(
                pipelines.contains(&build.pipeline_id),
                "build {} references unknown pipeline {}",
                build.build_id,
                build.pipeline_id
            );
        }

        let build_ids: HashSet<_> = builds.iter().map(|b| b.build_id.as_str()).collect();
        assert_eq!(build_ids.len(), builds.len());
    }

    #[test]
    fn test_run_history_targets_seeded_pipelines() {
        let pipelines: HashSet<_> = sample_data::sample_pipelines()
            .into_iter()
            .map(|p| p.pipeline_id)
            .collect();

        for (pipeline_id, _) in sample_data::sample_pipeline_runs() {
            assert!(pipelines.contains(pipeline_id));
        }
    }

    #[test]
    fn test_completed_builds_carry_duration_and_completion() {
        use cicd_dashboard_server::models::RunStatus;

        for build in sample_data::sample_builds() {
            match build.status {
                RunStatus::Success | RunStatus::Failure => {
                    assert!(build.completed_at.is_some(), "{} missing completion", build.build_id);
                    assert!(build.duration_secs.is_some(), "{} missing duration", build.build_id);
                }
                RunStatus::Running | RunStatus::Pending => {
                    assert!(build.completed_at.is_none(), "{} should be in flight", build.build_id);
                }
                RunStatus::Cancelled => {}
            }
        }
    }

    #[test]
    fn test_metric_snapshots_are_unique_per_date_and_tool() {
        let metrics = sample_data::sample_metrics();
        let keys: HashSet<_> = metrics.iter().map(|(date, tool, _)| (*date, *tool)).collect();
        assert_eq!(keys.len(), metrics.len());
    }

    #[test]
    fn test_metric_rates_are_percentages() {
        for (date, _, req) in sample_data::sample_metrics() {
            for (name, value) in [
                ("success_rate", req.success_rate),
                ("failure_rate", req.failure_rate),
                ("deployment_success_rate", req.deployment_success_rate),
                ("code_coverage", req.code_coverage),
                ("test_pass_rate", req.test_pass_rate),
            ] {
                assert!(
                    (0.0..=100.0).contains(&value),
                    "{} out of range on {}: {}",
                    name,
                    date,
                    value
                );
            }
            assert!((req.success_rate + req.failure_rate - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_acknowledged_alert_exists_in_dataset() {
        let (source_id, by) = sample_data::ACKNOWLEDGED_ALERT;
        assert!(!by.is_empty());
        assert!(
            sample_data::sample_alerts()
                .iter()
                .any(|a| a.source_id == source_id)
        );
    }

    #[test]
    fn test_configuration_names_are_unique_per_environment() {
        let configs = sample_data::sample_configurations();
        let keys: HashSet<_> = configs
            .iter()
            .map(|c| (c.name.as_str(), c.environment.as_str()))
            .collect();
        assert_eq!(keys.len(), configs.len());
    }
}
