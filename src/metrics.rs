use lazy_static::lazy_static;
use prometheus::{
    HistogramVec, IntCounterVec, register_histogram_vec, register_int_counter_vec,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "relay_requests_total",
        "Total number of relayed requests",
        &["operation"]
    )
    .unwrap();
    // class: success, invalid_api_key, remote_error, non_json
    pub static ref UPSTREAM_RESPONSES: IntCounterVec = register_int_counter_vec!(
        "relay_upstream_responses_total",
        "Runware responses by outcome",
        &["operation", "class"]
    )
    .unwrap();
    pub static ref TRANSPORT_ERRORS: IntCounterVec = register_int_counter_vec!(
        "relay_transport_errors_total",
        "Outbound calls that never completed",
        &["operation"]
    )
    .unwrap();
    pub static ref UPSTREAM_LATENCY: HistogramVec = register_histogram_vec!(
        "relay_upstream_latency_seconds",
        "Runware round trip latency in seconds",
        &["operation"]
    )
    .unwrap();
}
