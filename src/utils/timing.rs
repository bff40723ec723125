use std::time::Instant;

use chrono::Utc;
use tracing::info;

/// Wraps an outbound pipeline stage and emits request/response events on the
/// dedicated timing target, which is routed to its own log file.
pub async fn log_stage_timing<T, E, F, Fut>(service: &str, operation: &str, call: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let started_at = Utc::now();
    let started_perf = Instant::now();
    info!(
        target: "pipeline.timing",
        "event=stage_request service={} operation={} started_at={}",
        service,
        operation,
        started_at.to_rfc3339()
    );

    let result = call().await;
    let status = if result.is_ok() { "success" } else { "error" };

    let completed_at = Utc::now();
    let duration = started_perf.elapsed().as_secs_f64();
    info!(
        target: "pipeline.timing",
        "event=stage_response service={} operation={} completed_at={} duration_s={:.3} status={}",
        service,
        operation,
        completed_at.to_rfc3339(),
        duration,
        status
    );

    result
}
