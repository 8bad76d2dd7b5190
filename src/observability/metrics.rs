//! Metrics for the event intelligence pipeline.
//!
//! Recording goes through the `metrics` facade. Without an installed recorder
//! (library use, unit tests) every call is a no-op.

use std::fmt;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

use crate::error::{IntelError, Result};

/// Every metric name recorded by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Backend API
    ApiRequestsSuccess,
    ApiRequestsError,
    ApiRequestDuration,

    // Mapping
    EventsMapped,
    ImpactScore,
    PlaceholdersGenerated,

    // Views and loads
    ViewsApplied,
    ViewResultSize,
    LoadFallbacks,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::ApiRequestsSuccess => "event_intel_api_requests_success_total",
            MetricName::ApiRequestsError => "event_intel_api_requests_error_total",
            MetricName::ApiRequestDuration => "event_intel_api_request_duration_seconds",
            MetricName::EventsMapped => "event_intel_events_mapped_total",
            MetricName::ImpactScore => "event_intel_impact_score",
            MetricName::PlaceholdersGenerated => "event_intel_placeholders_generated_total",
            MetricName::ViewsApplied => "event_intel_views_applied_total",
            MetricName::ViewResultSize => "event_intel_view_result_size",
            MetricName::LoadFallbacks => "event_intel_load_fallbacks_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        [
            MetricName::ApiRequestsSuccess,
            MetricName::ApiRequestsError,
            MetricName::ApiRequestDuration,
            MetricName::EventsMapped,
            MetricName::ImpactScore,
            MetricName::PlaceholdersGenerated,
            MetricName::ViewsApplied,
            MetricName::ViewResultSize,
            MetricName::LoadFallbacks,
        ]
        .into_iter()
    }

    pub fn is_histogram(&self) -> bool {
        matches!(
            self,
            MetricName::ApiRequestDuration | MetricName::ImpactScore | MetricName::ViewResultSize
        )
    }

    /// Help text registered with the exporter.
    pub fn help(&self) -> &'static str {
        match self {
            MetricName::ApiRequestsSuccess => "Backend requests answered with a 2xx status",
            MetricName::ApiRequestsError => "Backend requests that failed or returned non-2xx",
            MetricName::ApiRequestDuration => "Backend request latency",
            MetricName::EventsMapped => "Events mapped into scored internal events",
            MetricName::ImpactScore => "Distribution of computed impact scores",
            MetricName::PlaceholdersGenerated => "Events that fell back to a generated placeholder image",
            MetricName::ViewsApplied => "Filter/sort/paginate passes",
            MetricName::ViewResultSize => "Events left after filtering",
            MetricName::LoadFallbacks => "Loads that degraded to an empty fallback",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder once; later calls return the same handle.
pub fn init() -> Result<PrometheusHandle> {
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| IntelError::Metrics(format!("Failed to install Prometheus recorder: {}", e)))?;

    for name in MetricName::all_metrics() {
        if name.is_histogram() {
            ::metrics::describe_histogram!(name.as_str(), name.help());
        } else {
            ::metrics::describe_counter!(name.as_str(), name.help());
        }
    }

    let handle = METRICS_HANDLE.get_or_init(|| handle).clone();
    info!("Metrics system initialized");
    Ok(handle)
}

/// Rendered Prometheus text, if the recorder is installed.
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|h| h.render())
}

// ============================================================================
// Backend API Metrics
// ============================================================================

pub mod api {
    use super::MetricName;

    pub fn request_success(endpoint: &'static str) {
        ::metrics::counter!(MetricName::ApiRequestsSuccess.as_str(), "endpoint" => endpoint).increment(1);
    }

    pub fn request_error(endpoint: &'static str) {
        ::metrics::counter!(MetricName::ApiRequestsError.as_str(), "endpoint" => endpoint).increment(1);
    }

    pub fn request_duration(endpoint: &'static str, secs: f64) {
        ::metrics::histogram!(MetricName::ApiRequestDuration.as_str(), "endpoint" => endpoint).record(secs);
    }
}

// ============================================================================
// Mapping Metrics
// ============================================================================

pub mod mapping {
    use super::MetricName;

    pub fn events_mapped(count: usize) {
        ::metrics::counter!(MetricName::EventsMapped.as_str()).increment(count as u64);
    }

    pub fn impact_score_recorded(score: u8) {
        ::metrics::histogram!(MetricName::ImpactScore.as_str()).record(score as f64);
    }
}

pub mod imaging {
    use super::MetricName;

    pub fn placeholder_generated() {
        ::metrics::counter!(MetricName::PlaceholdersGenerated.as_str()).increment(1);
    }
}

// ============================================================================
// View Metrics
// ============================================================================

pub mod view {
    use super::MetricName;

    pub fn view_applied(result_size: usize) {
        ::metrics::counter!(MetricName::ViewsApplied.as_str()).increment(1);
        ::metrics::histogram!(MetricName::ViewResultSize.as_str()).record(result_size as f64);
    }

    pub fn load_fallback(resource: &'static str) {
        ::metrics::counter!(MetricName::LoadFallbacks.as_str(), "resource" => resource).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_metric_names_are_unique_and_prefixed() {
        let names: HashSet<_> = MetricName::all_metrics().map(|m| m.as_str()).collect();
        assert_eq!(names.len(), MetricName::all_metrics().count());
        assert!(names.iter().all(|n| n.starts_with("event_intel_")));
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        api::request_success("events.list");
        mapping::events_mapped(3);
        view::view_applied(0);
        assert_eq!(MetricName::EventsMapped.to_string(), "event_intel_events_mapped_total");
    }
}
