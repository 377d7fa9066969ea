//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `orgtable_core::storage`. Every
//! SDK failure is a store-communication failure; the classification is kept
//! only for diagnostics.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use orgtable_core::storage::{FailureKind, StoreError, StoreFailure};

/// Map any DynamoDB operation error to StoreError.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: &'static str) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    let kind = classify(&err);
    let message = format!("{operation} failed: {}", DisplayErrorContext(&err));
    StoreError::Unavailable(StoreFailure::new(kind, message))
}

/// Classify an SDK error into a failure kind.
fn classify<E, R>(err: &SdkError<E, R>) -> FailureKind
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::ConstructionFailure(_) => FailureKind::InvalidRequest,
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            FailureKind::Network
        }
        SdkError::ServiceError(context) => classify_code(context.err().code()),
        _ => FailureKind::Unknown,
    }
}

/// Classify a DynamoDB service error code.
pub fn classify_code(code: Option<&str>) -> FailureKind {
    match code {
        Some(
            "ProvisionedThroughputExceededException"
            | "RequestLimitExceeded"
            | "ThrottlingException",
        ) => FailureKind::Throttled,
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "ExpiredTokenException"
            | "MissingAuthenticationTokenException",
        ) => FailureKind::AccessDenied,
        Some("ResourceNotFoundException") => FailureKind::TableNotFound,
        Some("ValidationException" | "SerializationException") => FailureKind::InvalidRequest,
        Some("InternalServerError" | "ServiceUnavailable") => FailureKind::Internal,
        _ => FailureKind::Unknown,
    }
}
