//! Prometheus metrics for observability.
//!
//! Request metrics are labelled by RPC operation rather than by path, since
//! every path serves the same endpoint.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use ticketdesk_core::{Operation, ResponseBody, RpcResponse};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ticketdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
        ]),
        &["operation", "status"],
    )
    .expect("valid histogram definition")
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketdesk_http_requests_total", "Total HTTP requests"),
        &["operation", "status"],
    )
    .expect("valid counter definition")
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "ticketdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .expect("valid gauge definition")
});

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets created through the RPC endpoint.
pub static TICKETS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("ticketdesk_tickets_created_total", "Total tickets created")
        .expect("valid counter definition")
});

/// Tickets deleted through the RPC endpoint.
pub static TICKETS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("ticketdesk_tickets_deleted_total", "Total tickets deleted")
        .expect("valid counter definition")
});

/// Tickets currently held by the store.
pub static TICKETS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("ticketdesk_tickets_stored", "Number of tickets in the store")
        .expect("valid gauge definition")
});

fn register_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        Box::new(TICKETS_CREATED_TOTAL.clone()),
        Box::new(TICKETS_DELETED_TOTAL.clone()),
        Box::new(TICKETS_STORED.clone()),
    ];

    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            tracing::warn!("Failed to register metric: {}", e);
        }
    }
}

/// Label value for an RPC method name. Unknown names collapse into
/// `unknown` to keep label cardinality bounded.
pub fn operation_label(method: Option<&str>) -> &'static str {
    method
        .and_then(Operation::from_name)
        .map(|op| op.as_str())
        .unwrap_or("unknown")
}

/// Update ticket counters after an RPC call.
pub fn record_rpc(operation: Option<Operation>, response: &RpcResponse, stored: usize) {
    match (operation, &response.body) {
        (Some(Operation::CreateTicket), ResponseBody::Ticket(_)) => TICKETS_CREATED_TOTAL.inc(),
        (Some(Operation::DeleteTicket), ResponseBody::Deletion(deletion)) if deletion.deleted => {
            TICKETS_DELETED_TOTAL.inc()
        }
        _ => {}
    }
    TICKETS_STORED.set(i64::try_from(stored).unwrap_or(i64::MAX));
}

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
