//! metricsx core: metric types, the registry, and the text/JSON renderers.
//!
//! This crate defines the metric model and the rendering surface shared by the
//! HTTP server and by applications that only want to produce the reports. It
//! carries no transport or runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod registry;
pub mod render;
pub mod value;

/// Shared result type.
pub use error::{Result, MetricsError};
pub use metric::{Counter, Gauge, Histogram, Meter, Metric, MetricKind, Timer};
pub use registry::{MetricRegistry, Snapshot};
pub use value::Value;
