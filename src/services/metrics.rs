//! Metrics collection and Prometheus integration service.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub upstream_requests_total: CounterVec,
    pub upstream_request_duration_seconds: HistogramVec,
    pub relay_errors_total: CounterVec,
    pub app_uptime_seconds: Gauge,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        // Outbound calls to the weather provider, by endpoint and outcome
        let upstream_requests_total = CounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Total weather provider requests by endpoint and outcome",
            ),
            &["endpoint", "outcome"],
        )?;

        let upstream_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_request_duration_seconds",
                "Duration of weather provider requests",
            )
            .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["endpoint"],
        )?;

        let relay_errors_total = CounterVec::new(
            Opts::new("relay_errors_total", "Error responses by relay error kind"),
            &["kind"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(upstream_requests_total.clone()))?;
        registry.register(Box::new(upstream_request_duration_seconds.clone()))?;
        registry.register(Box::new(relay_errors_total.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            upstream_requests_total,
            upstream_request_duration_seconds,
            relay_errors_total,
            app_uptime_seconds,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/metrics" {
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// Record one outbound provider call
    pub fn record_upstream(&self, endpoint: &str, outcome: &str, duration: Duration) {
        self.upstream_requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();

        self.upstream_request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration.as_secs_f64());
    }

    /// Count one error response of the given kind
    pub fn record_relay_error(&self, kind: &str) {
        self.relay_errors_total.with_label_values(&[kind]).inc();
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        self.app_uptime_seconds.set(self.uptime().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}
