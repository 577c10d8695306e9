//! Round statistics and Prometheus collectors
pub mod metrics;
pub mod stats;
