//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Ticket lifecycle (creations, state transitions, translation attempts)
//! - The external translation provider (latency, outcomes)
//!
//! The server registers everything returned by [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets created total.
pub static TICKETS_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "parlance_tickets_created_total",
        "Total tickets created since startup",
    )
    .unwrap()
});

/// Ticket state transitions.
pub static TICKET_STATE_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "parlance_ticket_state_transitions_total",
            "Ticket state transitions",
        ),
        &["from_state", "to_state"],
    )
    .unwrap()
});

/// Translation attempts by result.
pub static TRANSLATION_ATTEMPTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "parlance_translation_attempts_total",
            "Total translate operations",
        ),
        &["result"], // "translated", "failed", "rejected"
    )
    .unwrap()
});

/// Deliveries served.
pub static DELIVERIES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("parlance_deliveries_total", "Total successful deliveries").unwrap()
});

// =============================================================================
// Provider Metrics
// =============================================================================

/// Provider call duration in seconds.
pub static PROVIDER_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "parlance_provider_request_duration_seconds",
            "Duration of translation provider calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 8.0, 15.0]),
        &["provider"],
    )
    .unwrap()
});

/// Provider calls by outcome.
pub static PROVIDER_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "parlance_provider_requests_total",
            "Total translation provider requests",
        ),
        &["provider", "status"], // status: "success" or an error label
    )
    .unwrap()
});

/// All core metrics, for registration by the server.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TICKETS_CREATED.clone()),
        Box::new(TICKET_STATE_TRANSITIONS.clone()),
        Box::new(TRANSLATION_ATTEMPTS.clone()),
        Box::new(DELIVERIES.clone()),
        Box::new(PROVIDER_REQUEST_DURATION.clone()),
        Box::new(PROVIDER_REQUESTS.clone()),
    ]
}
