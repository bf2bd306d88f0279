//! Prometheus metrics for calendar generation
//!
//! This module provides metrics tracking for:
//! - Posts: how many came from a remote model vs. the template generator
//! - Providers: classified failures per model, roster switches
//! - Holidays: failed lookups
//! - Batches: end-to-end duration
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter, register_counter_vec, register_histogram, Counter, CounterVec, Encoder,
    Histogram, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

struct CalendarMetrics {
    posts_generated: CounterVec,
    provider_failures: CounterVec,
    roster_switches: Counter,
    holiday_lookup_failures: Counter,
    batch_duration: Histogram,
}

/// Set once; `None` when registration failed
static CALENDAR_METRICS: OnceLock<Option<CalendarMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static CalendarMetrics> {
    CALENDAR_METRICS.get().and_then(Option::as_ref)
}

// ============================================================================
// Initialization
// ============================================================================

fn register() -> Result<CalendarMetrics, prometheus::Error> {
    Ok(CalendarMetrics {
        posts_generated: register_counter_vec!(
            "postcal_posts_generated_total",
            "Calendar posts produced, by source",
            &["source"]
        )?,
        provider_failures: register_counter_vec!(
            "postcal_provider_failures_total",
            "Classified provider failures",
            &["provider", "kind"]
        )?,
        roster_switches: register_counter!(
            "postcal_roster_switches_total",
            "Number of times the model roster advanced"
        )?,
        holiday_lookup_failures: register_counter!(
            "postcal_holiday_lookup_failures_total",
            "Holiday lookups that failed and were treated as no holidays"
        )?,
        batch_duration: register_histogram!(
            "postcal_batch_duration_seconds",
            "Calendar batch duration in seconds",
            vec![0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]
        )?,
    })
}

/// Initialize all Prometheus metrics
///
/// Only the first call registers anything; concurrent callers wait for it.
/// If registration fails, every recorder stays a no-op.
///
/// ```ignore
/// if let Err(e) = postcal::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    let slot = CALENDAR_METRICS.get_or_init(|| match register() {
        Ok(metrics) => {
            tracing::info!("Prometheus metrics initialized successfully");
            Some(metrics)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus metrics registration failed");
            None
        }
    });

    match slot {
        Some(_) => Ok(()),
        None => Err("Prometheus metrics registration failed".into()),
    }
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    metrics().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a finished post; `source` is `remote` or `template`
pub fn record_post_generated(source: &str) {
    if let Some(m) = metrics() {
        m.posts_generated.with_label_values(&[source]).inc();
    }
}

pub fn record_provider_failure(provider: &str, kind: &str) {
    if let Some(m) = metrics() {
        m.provider_failures
            .with_label_values(&[provider, kind])
            .inc();
    }
}

pub fn record_roster_switch() {
    if let Some(m) = metrics() {
        m.roster_switches.inc();
    }
}

pub fn record_holiday_lookup_failure() {
    if let Some(m) = metrics() {
        m.holiday_lookup_failures.inc();
    }
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start a batch timer; the duration is recorded when the guard drops
pub fn start_batch_timer() -> MetricsTimer {
    match metrics() {
        Some(m) => MetricsTimer::new(m.batch_duration.start_timer()),
        None => MetricsTimer::noop(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ensure_metrics_initialized() {
        let _ = init_metrics();
    }

    #[test]
    fn test_init_metrics_is_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
        assert!(metrics_initialized());
    }

    #[test]
    fn test_gather_metrics() {
        ensure_metrics_initialized();
        record_post_generated("remote");
        record_provider_failure("llama-3.1-8b-instant", "RATE_LIMIT");

        let text = gather_metrics().unwrap();
        assert!(text.contains("postcal_posts_generated_total"));
        assert!(text.contains("postcal_provider_failures_total"));
    }

    #[test]
    fn test_recorders_do_not_panic() {
        ensure_metrics_initialized();
        record_post_generated("template");
        record_roster_switch();
        record_holiday_lookup_failure();
        let _timer = start_batch_timer();
    }
}
