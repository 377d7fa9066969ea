use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orgtable_core::organization::STORE_FAILURE_MESSAGE;
use orgtable_core::storage::{store_error_to_status_code, StoreError};

/// Handler error wrapping `anyhow::Error`.
///
/// Store errors are logged with their cause and collapsed into one uniform
/// body; callers cannot tell throttling from a missing table.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Some(store_error) = self.0.downcast_ref::<StoreError>() else {
            tracing::error!(error = %self.0, "Application error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Something went wrong" })),
            )
                .into_response();
        };

        tracing::error!(
            error = %store_error,
            kind = ?store_error.failure_kind(),
            "Store error"
        );
        let status_code = StatusCode::from_u16(store_error_to_status_code(store_error))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status_code,
            Json(serde_json::json!({ "error": STORE_FAILURE_MESSAGE })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
