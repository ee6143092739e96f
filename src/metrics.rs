//! Prometheus metrics for the mock issuer.

use once_cell::sync::Lazy;
use prometheus::{register_counter_vec, CounterVec};

/// Tokens issued counter.
pub static TOKENS_ISSUED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "mock_cognito_tokens_issued_total",
        "Total number of tokens issued",
        &["algorithm"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Signing failures counter.
pub static SIGNING_FAILURES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "mock_cognito_signing_failures_total",
        "Total number of failed signing attempts",
        &["reason"]
    )
    .expect("Failed to register signing_failures metric")
});

/// Discovery requests counter.
pub static DISCOVERY_REQUESTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "mock_cognito_discovery_requests_total",
        "Total number of discovery document requests",
        &["status"]
    )
    .expect("Failed to register discovery_requests metric")
});

pub fn record_token_issued(algorithm: &str) {
    TOKENS_ISSUED.with_label_values(&[algorithm]).inc();
}

pub fn record_signing_failure(reason: &str) {
    SIGNING_FAILURES.with_label_values(&[reason]).inc();
}

/// `status` is `served` or `disabled`.
pub fn record_discovery_request(status: &str) {
    DISCOVERY_REQUESTS.with_label_values(&[status]).inc();
}
