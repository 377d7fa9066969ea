//! Pure functions for mapping store errors to HTTP status codes.

use super::StoreError;

/// Maps a [`StoreError`] to an HTTP status code.
///
/// Every store error surfaces as 500. The underlying cause is available
/// through [`StoreError::failure_kind`] for logging.
///
/// # Examples
///
/// ```
/// use orgtable_core::storage::{store_error_to_status_code, FailureKind, StoreError, StoreFailure};
///
/// let error = StoreError::Unavailable(StoreFailure::new(FailureKind::Network, "timeout"));
/// assert_eq!(store_error_to_status_code(&error), 500);
/// ```
pub fn store_error_to_status_code(error: &StoreError) -> u16 {
    match error {
        StoreError::Unavailable(_) => 500,
        StoreError::InvalidData(_) => 500,
    }
}
