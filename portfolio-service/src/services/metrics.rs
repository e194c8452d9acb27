//! Metrics collection for portfolio-service.
//!
//! HTTP request metrics come from the shared middleware; the counters here
//! track contact submissions and project-listing fallbacks, which callers
//! cannot tell apart from live data.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder. Only the first call has any effect.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if METRICS_HANDLE.set(handle).is_err() {
                tracing::debug!("Metrics handle already set");
            }
        }
        Err(e) => {
            tracing::warn!("Failed to install Prometheus recorder: {}", e);
        }
    }
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_contact_submission(status: &'static str) {
    counter!("portfolio_contact_submissions_total", "status" => status).increment(1);
}

pub fn record_projects_fallback(reason: &'static str) {
    counter!("portfolio_projects_fallback_total", "reason" => reason).increment(1);
}
