use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all catalog metrics
const PREFIX: &str = "parts_catalog";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Image Mutation Metrics
    pub static ref IMAGE_MUTATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_image_mutations_total"), "Image mutations by operation and outcome"),
        &["operation", "outcome"]
    ).expect("Failed to create image_mutations_total metric");

    // Catalog Metrics
    pub static ref CATALOG_ITEMS_TOTAL: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_catalog_items_total"), "Total items in catalog"),
        &["type"]
    ).expect("Failed to create catalog_items_total metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");

    pub static ref PROCESS_MEMORY_BYTES: Gauge = Gauge::new(
        format!("{PREFIX}_process_memory_bytes"),
        "Process memory usage in bytes"
    ).expect("Failed to create process_memory_bytes metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Already registered is fine, tests call this repeatedly
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(IMAGE_MUTATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_ITEMS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PROCESS_MEMORY_BYTES.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Set the catalog size gauges
pub fn set_catalog_metrics(num_parts: usize, num_images: usize) {
    CATALOG_ITEMS_TOTAL
        .with_label_values(&["part"])
        .set(num_parts as f64);

    CATALOG_ITEMS_TOTAL
        .with_label_values(&["image"])
        .set(num_images as f64);
}

/// Collapse a request path onto its route so ids do not blow up label
/// cardinality.
pub fn categorize_endpoint(path: &str) -> &'static str {
    if path == "/v1/images" {
        "/v1/images"
    } else if path.starts_with("/v1/parts/") && path.ends_with("/images") {
        "/v1/parts/{id}/images"
    } else if path.starts_with("/v1/parts/") {
        "/v1/parts/{id}"
    } else if path == "/" {
        "/"
    } else {
        "other"
    }
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let endpoint = categorize_endpoint(path);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, endpoint])
        .observe(duration.as_secs_f64());
}

/// Record the outcome of a create/update/delete
pub fn record_image_mutation(operation: &str, outcome: &str) {
    IMAGE_MUTATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Record an error
pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Update process memory usage
pub fn update_memory_usage() {
    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            for line in status.lines() {
                if line.starts_with("VmRSS:") {
                    // RSS is reported in kB
                    if let Some(kb_str) = line.split_whitespace().nth(1) {
                        if let Ok(kb) = kb_str.parse::<f64>() {
                            PROCESS_MEMORY_BYTES.set(kb * 1024.0);
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    update_memory_usage();

    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_metric(name: &str) -> bool {
        let full_name = format!("{PREFIX}_{name}");
        REGISTRY
            .gather()
            .iter()
            .any(|m| m.get_name() == full_name)
    }

    #[test]
    fn test_metrics_initialization() {
        init_metrics();
        init_metrics();
        // Vec metrics only show up once they have a labelled child
        set_catalog_metrics(1, 2);
        assert!(find_metric("catalog_items_total"));
        assert!(find_metric("process_memory_bytes"));
    }

    #[test]
    fn test_record_http_request() {
        init_metrics();
        record_http_request("GET", "/v1/parts/BP-100/images", 200, Duration::from_millis(50));

        assert!(find_metric("http_requests_total"));
        let count = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/v1/parts/{id}/images", "200"])
            .get();
        assert!(count >= 1.0);
    }

    #[test]
    fn test_record_image_mutation() {
        init_metrics();
        record_image_mutation("create", "success");
        record_image_mutation("create", "conflict");

        assert!(find_metric("image_mutations_total"));
        assert!(
            IMAGE_MUTATIONS_TOTAL
                .with_label_values(&["create", "conflict"])
                .get()
                >= 1.0
        );
    }

    #[test]
    fn test_categorize_endpoint() {
        assert_eq!(categorize_endpoint("/v1/images"), "/v1/images");
        assert_eq!(categorize_endpoint("/v1/parts/abc"), "/v1/parts/{id}");
        assert_eq!(
            categorize_endpoint("/v1/parts/abc/images"),
            "/v1/parts/{id}/images"
        );
        assert_eq!(categorize_endpoint("/"), "/");
        assert_eq!(categorize_endpoint("/index.html"), "other");
    }
}
