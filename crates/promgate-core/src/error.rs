//! Shared error type across promgate crates.

use thiserror::Error;

/// Stable error codes surfaced to callers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Metric options failed validation.
    InvalidMetric,
    /// A metric name is registered with a different kind.
    KindMismatch,
    /// Label values do not match the declared label names.
    LabelMismatch,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidMetric => "INVALID_METRIC",
            ClientCode::KindMismatch => "KIND_MISMATCH",
            ClientCode::LabelMismatch => "LABEL_MISMATCH",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromgateError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum PromgateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid metric: {0}")]
    InvalidMetric(String),
    #[error("metric {name} is registered as {found}, not {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("metric {name} expects {expected} label values, got {got}")]
    LabelMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl PromgateError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            PromgateError::BadRequest(_) => ClientCode::BadRequest,
            PromgateError::InvalidMetric(_) => ClientCode::InvalidMetric,
            PromgateError::KindMismatch { .. } => ClientCode::KindMismatch,
            PromgateError::LabelMismatch { .. } => ClientCode::LabelMismatch,
            PromgateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            PromgateError::Internal(_) => ClientCode::Internal,
        }
    }
}
