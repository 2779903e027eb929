//! Shared error type across metricsx crates.

use thiserror::Error;

use crate::metric::MetricKind;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// A name is already taken by a metric of another kind.
    KindMismatch,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::KindMismatch => "KIND_MISMATCH",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("metric {name} is a {found}, not a {expected}")]
    KindMismatch {
        name: String,
        expected: MetricKind,
        found: MetricKind,
    },
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("render failed")]
    Render(#[from] std::fmt::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            MetricsError::BadRequest(_) => ErrorCode::BadRequest,
            MetricsError::KindMismatch { .. } => ErrorCode::KindMismatch,
            MetricsError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            MetricsError::Render(_) | MetricsError::Internal(_) => ErrorCode::Internal,
        }
    }
}
