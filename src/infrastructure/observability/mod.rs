//! Prometheus metrics for analysis outcomes and scan timing, exposed as text
//! at `GET /metrics`.

pub mod metrics;

pub use metrics::Metrics;
