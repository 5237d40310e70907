//! Observability infrastructure for Goldfeed
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics exporter
//! - HTTP request metric helpers
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("goldfeed", LogFormat::Pretty)?;
//!
//! // Optional
//! observability::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, HttpMetrics};
