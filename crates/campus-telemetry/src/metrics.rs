//! Prometheus metrics for Campus-Connect.
//!
//! All metrics follow the naming convention: `cc_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, Opts,
    Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // AUTH GATE METRICS
    // =========================================================================

    /// Guard calls by outcome
    pub static ref AUTH_VALIDATIONS: CounterVec = CounterVec::new(
        Opts::new("cc_auth_validations_total", "Email guard calls by outcome"),
        &["outcome"]  // outcome: accepted/rejected/rate_limited
    ).expect("metric creation failed");

    /// Rejections by internal reason
    pub static ref AUTH_REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("cc_auth_rejections_total", "Email rejections by internal reason"),
        &["reason"]
    ).expect("metric creation failed");

    /// Guard latency
    pub static ref GUARD_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "cc_auth_guard_duration_seconds",
            "Time spent in the email guard"
        ).buckets(exponential_buckets(0.000_001, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // ABUSE LIMITER METRICS
    // =========================================================================

    /// Records currently held by the limiter
    pub static ref LIMITER_TRACKED_KEYS: Gauge = Gauge::new(
        "cc_limiter_tracked_keys",
        "Attempt records currently held in memory"
    ).expect("metric creation failed");

    /// Records removed by the periodic sweep
    pub static ref LIMITER_SWEPT: Counter = Counter::new(
        "cc_limiter_swept_total",
        "Expired attempt records removed by the sweep"
    ).expect("metric creation failed");

    // =========================================================================
    // HTTP METRICS
    // =========================================================================

    /// HTTP responses by route and status class
    pub static ref HTTP_REQUESTS: CounterVec = CounterVec::new(
        Opts::new("cc_http_requests_total", "HTTP responses by route and status"),
        &["route", "status"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Safe to call more than once; metrics already registered are skipped.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Auth gate
        Box::new(AUTH_VALIDATIONS.clone()),
        Box::new(AUTH_REJECTIONS.clone()),
        Box::new(GUARD_DURATION.clone()),
        // Limiter
        Box::new(LIMITER_TRACKED_KEYS.clone()),
        Box::new(LIMITER_SWEPT.clone()),
        // HTTP
        Box::new(HTTP_REQUESTS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
