//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Seed runs (outcome, records inserted)
//! - External requests (PokeAPI)

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

// =============================================================================
// Seed Metrics
// =============================================================================

/// Seed runs total by result.
pub static SEED_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pokedex_seed_runs_total", "Total seed runs"),
        &["result"], // "success", "fetch_failed", "store_failed", "invalid_entry"
    )
    .unwrap()
});

/// Records inserted by seed runs.
pub static SEED_RECORDS_INSERTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "pokedex_seed_records_inserted_total",
        "Total records bulk-inserted by seed runs",
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External API requests by service and result.
pub static EXTERNAL_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "pokedex_external_requests_total",
            "External API requests",
        ),
        &["service", "result"],
    )
    .unwrap()
});

/// All core metrics, for registration with a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEED_RUNS.clone()),
        Box::new(SEED_RECORDS_INSERTED.clone()),
        Box::new(EXTERNAL_REQUESTS.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_metrics_registers_cleanly() {
        let registry = prometheus::Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }

        SEED_RUNS.with_label_values(&["success"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"pokedex_seed_runs_total".to_string()));
    }
}
