use std::fmt;

use thiserror::Error;

/// Underlying cause of a store-communication failure.
///
/// Kept for diagnostics only; the front door collapses every kind into one
/// uniform failure response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Provisioned throughput or request rate exceeded.
    Throttled,
    /// Credentials missing, expired or lacking permission.
    AccessDenied,
    /// Dispatch, timeout or response-level transport fault.
    Network,
    /// The configured table does not exist.
    TableNotFound,
    /// The store rejected the request shape.
    InvalidRequest,
    /// The store reported an internal error.
    Internal,
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Throttled => "throttled",
            FailureKind::AccessDenied => "access denied",
            FailureKind::Network => "network",
            FailureKind::TableNotFound => "table not found",
            FailureKind::InvalidRequest => "invalid request",
            FailureKind::Internal => "internal",
            FailureKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A failed round trip to the store, with its classified cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct StoreFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl StoreFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors that can occur during store operations.
///
/// Absence of a record is never an error; lookups return `None` and scans
/// return an empty vector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable ({0})")]
    Unavailable(StoreFailure),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Returns the classified cause for store-communication failures.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            StoreError::Unavailable(failure) => Some(failure.kind),
            StoreError::InvalidData(_) => None,
        }
    }
}

impl From<StoreFailure> for StoreError {
    fn from(failure: StoreFailure) -> Self {
        StoreError::Unavailable(failure)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
