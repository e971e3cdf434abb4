//! Metrics and observability utilities
//!
//! Prometheus-style metrics with standardized naming under the
//! `movies_` prefix.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Movies API metrics
pub const METRICS_PREFIX: &str = "movies";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Write metrics
    describe_counter!(
        format!("{}_movie_writes_total", METRICS_PREFIX),
        Unit::Count,
        "Movie rows created, updated or deleted"
    );

    describe_counter!(
        format!("{}_rating_writes_total", METRICS_PREFIX),
        Unit::Count,
        "Rating rows created, updated or deleted"
    );

    describe_counter!(
        format!("{}_ratings_rejected_total", METRICS_PREFIX),
        Unit::Count,
        "Ratings rejected because their movie does not exist"
    );

    tracing::info!("Metrics registered");
}

/// Kind of row change recorded by the write counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Created,
    Updated,
    Deleted,
}

impl WriteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteAction::Created => "created",
            WriteAction::Updated => "updated",
            WriteAction::Deleted => "deleted",
        }
    }
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record a movie row change
pub fn record_movie_write(action: WriteAction) {
    counter!(
        format!("{}_movie_writes_total", METRICS_PREFIX),
        "action" => action.as_str()
    )
    .increment(1);
}

/// Helper to record a rating row change
pub fn record_rating_write(action: WriteAction) {
    counter!(
        format!("{}_rating_writes_total", METRICS_PREFIX),
        "action" => action.as_str()
    )
    .increment(1);
}

/// Helper to record a rating that failed the movie reference check
pub fn record_rating_rejected() {
    counter!(format!("{}_ratings_rejected_total", METRICS_PREFIX)).increment(1);
}
