//! Organization handlers.
//!
//! Routes take the organization's natural name and derive the partition key
//! (`ORG#<name>`) before touching the store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use orgtable_core::organization::{NormalizedRecord, OrgReport, Organization};
use orgtable_core::storage::{keys, EntityKind};

use crate::{
    handlers::AppError,
    state::AppState,
    storage::WriteSummary,
};

/// Error response with message (for malformed path segments).
fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let msg = message.into();
    tracing::warn!(status = %status, message = %msg, "API error");
    (status, Json(serde_json::json!({ "error": msg }))).into_response()
}

/// Query parameters for the report endpoint.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Department to read back in full (defaults to the configured one).
    pub department: Option<String>,
}

/// Ingest a full organization payload (POST /api/organizations).
pub async fn create_organization(
    State(state): State<AppState>,
    Json(org): Json<Organization>,
) -> Result<(StatusCode, Json<WriteSummary>), AppError> {
    let summary = state.store.write_organization(&org).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Get an organization's metadata (GET /api/organizations/{org}).
///
/// An unknown organization yields an empty object, not a 404.
pub async fn get_organization(
    State(state): State<AppState>,
    Path(org): Path<String>,
) -> Result<Json<NormalizedRecord>, AppError> {
    let metadata = state.store.get_metadata(&keys::org_pk(&org)).await?;
    Ok(Json(metadata))
}

/// Read back the full report (GET /api/organizations/{org}/report).
pub async fn get_report(
    State(state): State<AppState>,
    Path(org): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<OrgReport>, AppError> {
    let department = query
        .department
        .unwrap_or_else(|| state.config.report_department.clone());
    let report = state
        .store
        .build_report(&keys::org_pk(&org), &department)
        .await?;
    Ok(Json(report))
}

/// Prefix scan for one entity type (GET /api/organizations/{org}/records/{kind}).
///
/// `kind` is a plural name (`departments`) or a raw prefix (`DEPT#`).
pub async fn list_records(
    State(state): State<AppState>,
    Path((org, kind)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let kind: EntityKind = match kind.parse() {
        Ok(kind) => kind,
        Err(e) => return Ok(error_response(StatusCode::BAD_REQUEST, e.to_string())),
    };

    let records = state.store.list_by_prefix(&keys::org_pk(&org), kind).await?;
    Ok(Json(records).into_response())
}

/// Get one department (GET /api/organizations/{org}/departments/{name}).
pub async fn get_department(
    State(state): State<AppState>,
    Path((org, name)): Path<(String, String)>,
) -> Result<Json<NormalizedRecord>, AppError> {
    let department = state
        .store
        .get_department(&keys::org_pk(&org), &name)
        .await?;
    Ok(Json(department))
}

/// Resolve a project's employee references
/// (GET /api/organizations/{org}/projects/{name}/employees).
pub async fn list_project_employees(
    State(state): State<AppState>,
    Path((org, name)): Path<(String, String)>,
) -> Result<Json<Vec<NormalizedRecord>>, AppError> {
    let employees = state
        .store
        .project_employees(&keys::org_pk(&org), &name)
        .await?;
    Ok(Json(employees))
}
