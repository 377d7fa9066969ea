//! One-shot invocation.
//!
//! Ingests the bundled sample organization, reads it back, and produces the
//! same status/body envelope a serverless front door would return.

use orgtable_core::organization::{sample_organization, InvocationResponse, OrgReport};
use orgtable_core::storage::{keys, StoreError};

use crate::storage::KeyedItemStore;

/// Runs the ingest-then-report sequence and wraps the outcome.
///
/// Any store failure, from either the write or the read phase, becomes the
/// uniform 500 response.
pub async fn invoke(store: &KeyedItemStore, department: &str) -> anyhow::Result<InvocationResponse> {
    match ingest_and_report(store, department).await {
        Ok(report) => Ok(InvocationResponse::ok(&report)?),
        Err(e) => {
            tracing::error!(error = %e, kind = ?e.failure_kind(), "Invocation failed");
            Ok(InvocationResponse::from_error(&e))
        }
    }
}

async fn ingest_and_report(store: &KeyedItemStore, department: &str) -> Result<OrgReport, StoreError> {
    let org = sample_organization();
    store.write_organization(&org).await?;
    store.build_report(&keys::org_pk(&org.name), department).await
}
