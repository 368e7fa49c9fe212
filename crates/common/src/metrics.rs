use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder};

lazy_static! {
    // Catalog operation metrics
    pub static ref OPERATION_COUNTER: CounterVec = register_counter_vec!(
        "catalog_operations_total",
        "Total number of catalog operations processed",
        &["operation", "status"]
    )
    .expect("metric cannot be created");

    pub static ref OPERATION_DURATION: HistogramVec = register_histogram_vec!(
        "catalog_operation_duration_seconds",
        "Catalog operation duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("metric cannot be created");

    // Cache metrics
    pub static ref CACHE_REQUEST_COUNTER: CounterVec = register_counter_vec!(
        "catalog_cache_requests_total",
        "Total number of cache lookups by outcome",
        &["cache_type", "status"]
    )
    .expect("metric cannot be created");

    // Image task publish metrics
    pub static ref IMAGE_TASK_COUNTER: CounterVec = register_counter_vec!(
        "catalog_image_tasks_total",
        "Total number of image processing tasks published",
        &["status"]
    )
    .expect("metric cannot be created");
}

/// Outcome of a cache lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    Error,
}

impl CacheOutcome {
    fn as_label(self) -> &'static str {
        match self {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Error => "error",
        }
    }
}

/// Get all metrics in Prometheus text format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Helper function to record a catalog operation
pub fn record_operation(operation: &str, success: bool, duration_secs: f64) {
    let status = if success { "success" } else { "error" };
    OPERATION_COUNTER
        .with_label_values(&[operation, status])
        .inc();
    OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Helper function to record cache hit/miss/error
pub fn record_cache_request(cache_type: &str, outcome: CacheOutcome) {
    CACHE_REQUEST_COUNTER
        .with_label_values(&[cache_type, outcome.as_label()])
        .inc();
}

/// Helper function to record an image task publish attempt
pub fn record_image_task(success: bool) {
    let status = if success { "success" } else { "error" };
    IMAGE_TASK_COUNTER.with_label_values(&[status]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operation() {
        record_operation("create_product", true, 0.05);
        let metrics = gather_metrics().unwrap();
        assert!(metrics.contains("catalog_operations_total"));
        assert!(metrics.contains("catalog_operation_duration_seconds"));
    }

    #[test]
    fn test_record_cache_request() {
        record_cache_request("product", CacheOutcome::Error);
        let metrics = gather_metrics().unwrap();
        assert!(metrics.contains("catalog_cache_requests_total"));
        assert!(metrics.contains("status=\"error\""));
    }

    #[test]
    fn test_record_image_task() {
        record_image_task(false);
        let metrics = gather_metrics().unwrap();
        assert!(metrics.contains("catalog_image_tasks_total"));
    }
}
