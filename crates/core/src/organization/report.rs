//! Read-side result envelope returned by the front door.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::storage::{store_error_to_status_code, StoreError};

/// Body returned for any store failure. Causes are logged, never exposed.
pub const STORE_FAILURE_MESSAGE: &str = "Error querying data from the store";

/// A normalized record as handed to callers.
pub type NormalizedRecord = Map<String, Value>;

/// Everything the reference invocation reads back for one organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrgReport {
    pub organization_metadata: NormalizedRecord,
    pub departments: Vec<NormalizedRecord>,
    pub department: NormalizedRecord,
    pub projects: Vec<NormalizedRecord>,
    pub employees: Vec<NormalizedRecord>,
    pub managers: Vec<NormalizedRecord>,
}

/// Serverless-style response: a status code plus a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    /// Wraps a successful report with status 200.
    pub fn ok(report: &OrgReport) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string_pretty(report)?,
        })
    }

    /// Collapses any store error into the uniform failure response.
    pub fn from_error(error: &StoreError) -> Self {
        Self {
            status_code: store_error_to_status_code(error),
            body: Value::String(STORE_FAILURE_MESSAGE.to_string()).to_string(),
        }
    }
}
