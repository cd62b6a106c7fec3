use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response
};
use prometheus::{HistogramOpts, HistogramVec, Registry, TextEncoder};
#[cfg(target_os = "linux")]
use prometheus::process_collector::ProcessCollector;
use std::{
    sync::Arc,
    time::{Duration, Instant}
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct MetricsError(#[from] prometheus::Error);

#[derive(Debug)]
pub struct LatencyLabels<'a> {
    pub method: &'a str,
    pub route: &'a str,
    pub status_code: u16
}

pub trait LatencyRecorder {
    fn record_latency(&self, labels: &LatencyLabels, duration: Duration);

    fn render(&self) -> Result<String, MetricsError>;
}

pub type MetricsArc = Arc<dyn LatencyRecorder + Send + Sync>;

pub struct PrometheusMetrics {
    registry: Registry,
    http_duration: HistogramVec
}

impl PrometheusMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let http_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests"
            ),
            &["method", "route", "status_code"]
        )?;

        let registry = Registry::new();
        registry.register(Box::new(http_duration.clone()))?;

        // process_* metrics are only collected where procfs exists
        #[cfg(target_os = "linux")]
        registry.register(Box::new(ProcessCollector::for_self()))?;

        Ok(PrometheusMetrics { registry, http_duration })
    }
}

impl LatencyRecorder for PrometheusMetrics {
    fn record_latency(&self, labels: &LatencyLabels, duration: Duration) {
        self.http_duration
            .with_label_values(&[
                labels.method,
                labels.route,
                &labels.status_code.to_string()
            ])
            .observe(duration.as_secs_f64());
    }

    fn render(&self) -> Result<String, MetricsError> {
        Ok(TextEncoder::new().encode_to_string(&self.registry.gather())?)
    }
}

pub async fn track_latency(
    State(metrics): State<MetricsArc>,
    req: Request,
    next: Next
) -> Response
{
    let method = req.method().clone();
    let route = req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let start = Instant::now();
    let response = next.run(req).await;

    metrics.record_latency(
        &LatencyLabels {
            method: method.as_str(),
            route: &route,
            status_code: response.status().as_u16()
        },
        start.elapsed()
    );

    response
}
