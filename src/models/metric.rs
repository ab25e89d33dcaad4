//! Metric snapshot models and the metrics-page aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::pipeline::CiTool;

/// Request to upsert the daily snapshot for a `(date, tool)` pair.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertMetricRequest {
    pub total_pipelines: i32,
    pub total_builds: i32,
    /// Percentage 0-100.
    pub success_rate: f64,
    /// Percentage 0-100.
    pub failure_rate: f64,
    pub average_build_time_secs: f64,
    pub average_pipeline_time_secs: f64,
    pub deployments: i32,
    pub deployment_success_rate: f64,
    pub code_coverage: f64,
    pub test_pass_rate: f64,
}

/// Metric snapshot returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub tool: CiTool,
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
}

/// Metric list response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricListResponse {
    pub metrics: Vec<MetricResponse>,
    pub total: u64,
}

/// Query parameters for listing metric snapshots.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListMetricsQuery {
    /// Filter by CI tool.
    #[serde(default)]
    pub tool: Option<CiTool>,
    /// Inclusive start date (YYYY-MM-DD).
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD).
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// One point in the per-day trend series.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub average_build_time_secs: f64,
    pub average_pipeline_time_secs: f64,
    pub total_builds: i32,
}

/// Aggregate over a date range, shaped for the metrics page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetricsSummaryResponse {
    /// Number of snapshots the summary was computed from.
    pub snapshot_count: usize,
    pub total_builds: i64,
    pub total_deployments: i64,
    pub success_rate: f64,
    pub failure_rate: f64,
    pub average_build_time_secs: f64,
    pub average_pipeline_time_secs: f64,
    pub deployment_success_rate: f64,
    pub code_coverage: f64,
    pub test_pass_rate: f64,
    /// Per-day series, ascending by date. Snapshots for the same date
    /// (different tools) are averaged into one point.
    pub trends: Vec<TrendPoint>,
}

impl MetricsSummaryResponse {
    /// Compute the range summary from raw snapshots.
    ///
    /// Returns `None` for an empty range so callers can distinguish
    /// "no data" from a zeroed summary.
    pub fn from_snapshots(snapshots: &[MetricResponse]) -> Option<Self> {
        if snapshots.is_empty() {
            return None;
        }

        let n = snapshots.len() as f64;
        let mean = |f: fn(&MetricResponse) -> f64| snapshots.iter().map(f).sum::<f64>() / n;

        // Group by date, averaging across tools.
        let mut by_date: std::collections::BTreeMap<NaiveDate, Vec<&MetricResponse>> =
            std::collections::BTreeMap::new();
        for snap in snapshots {
            by_date.entry(snap.date).or_default().push(snap);
        }

        let trends = by_date
            .into_iter()
            .map(|(date, day)| {
                let dn = day.len() as f64;
                let dmean = |f: fn(&MetricResponse) -> f64| {
                    day.iter().map(|m| f(m)).sum::<f64>() / dn
                };
                TrendPoint {
                    date,
                    success_rate: dmean(|m| m.success_rate),
                    failure_rate: dmean(|m| m.failure_rate),
                    average_build_time_secs: dmean(|m| m.average_build_time_secs),
                    average_pipeline_time_secs: dmean(|m| m.average_pipeline_time_secs),
                    total_builds: day.iter().map(|m| m.total_builds).sum(),
                }
            })
            .collect();

        Some(MetricsSummaryResponse {
            snapshot_count: snapshots.len(),
            total_builds: snapshots.iter().map(|m| m.total_builds as i64).sum(),
            total_deployments: snapshots.iter().map(|m| m.deployments as i64).sum(),
            success_rate: mean(|m| m.success_rate),
            failure_rate: mean(|m| m.failure_rate),
            average_build_time_secs: mean(|m| m.average_build_time_secs),
            average_pipeline_time_secs: mean(|m| m.average_pipeline_time_secs),
            deployment_success_rate: mean(|m| m.deployment_success_rate),
            code_coverage: mean(|m| m.code_coverage),
            test_pass_rate: mean(|m| m.test_pass_rate),
            trends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(date: &str, tool: CiTool, success_rate: f64, builds: i32) -> MetricResponse {
        MetricResponse {
            id: Uuid::now_v7(),
            date: date.parse().unwrap(),
            tool,
            total_pipelines: 3,
            total_builds: builds,
            success_rate,
            failure_rate: 100.0 - success_rate,
            average_build_time_secs: 300.0,
            average_pipeline_time_secs: 480.0,
            deployments: 2,
            deployment_success_rate: 100.0,
            code_coverage: 85.0,
            test_pass_rate: 97.0,
        }
    }

    #[test]
    fn test_empty_range_yields_none() {
        assert!(MetricsSummaryResponse::from_snapshots(&[]).is_none());
    }

    #[test]
    fn test_rates_are_averaged_and_counts_summed() {
        let snaps = vec![
            snapshot("2024-01-14", CiTool::Github, 90.0, 40),
            snapshot("2024-01-15", CiTool::Github, 80.0, 60),
        ];
        let summary = MetricsSummaryResponse::from_snapshots(&snaps).unwrap();

        assert_eq!(summary.snapshot_count, 2);
        assert_eq!(summary.total_builds, 100);
        assert_eq!(summary.total_deployments, 4);
        assert!((summary.success_rate - 85.0).abs() < f64::EPSILON);
        assert!((summary.failure_rate - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trends_merge_tools_per_day_ascending() {
        let snaps = vec![
            snapshot("2024-01-15", CiTool::Github, 90.0, 40),
            snapshot("2024-01-15", CiTool::Jenkins, 70.0, 10),
            snapshot("2024-01-14", CiTool::Github, 100.0, 20),
        ];
        let summary = MetricsSummaryResponse::from_snapshots(&snaps).unwrap();

        assert_eq!(summary.trends.len(), 2);
        assert_eq!(summary.trends[0].date, "2024-01-14".parse().unwrap());
        assert_eq!(summary.trends[1].date, "2024-01-15".parse().unwrap());
        // Jan 15 merges github and jenkins snapshots
        assert!((summary.trends[1].success_rate - 80.0).abs() < f64::EPSILON);
        assert_eq!(summary.trends[1].total_builds, 50);
    }
}
