//! Keyed item access for organization trees.
//!
//! [`KeyedItemStore`] writes a nested organization as flat records and reads
//! subsets of a partition back through exact lookups or sort-key prefix
//! scans. Every record leaving this type is normalized.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::{stream, TryStreamExt};

use orgtable_core::organization::{NormalizedRecord, OrgReport, Organization};
use orgtable_core::storage::{
    flatten_organization, keys, normalize_record, EntityKind, ItemStore, Record, RecordKey,
    Result,
};

/// Outcome of a successful ingest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteSummary {
    pub partition_key: String,
    pub records_written: usize,
}

/// Single-table access layer over an injected [`ItemStore`].
#[derive(Clone)]
pub struct KeyedItemStore {
    store: Arc<dyn ItemStore>,
    ingest_concurrency: usize,
}

impl KeyedItemStore {
    /// Creates a store that writes records one at a time.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            ingest_concurrency: 1,
        }
    }

    /// Sets how many record writes may be in flight during an ingest.
    ///
    /// Each record has a distinct key, so any value yields the same final
    /// state. Zero is treated as one.
    pub fn with_ingest_concurrency(mut self, concurrency: usize) -> Self {
        self.ingest_concurrency = concurrency.max(1);
        self
    }

    // ========================================================================
    // Write path
    // ========================================================================

    /// Flattens an organization and writes every record.
    ///
    /// The first failed write aborts the pass. Records already written stay
    /// in place, so a partial tree is a possible outcome.
    pub async fn write_organization(&self, org: &Organization) -> Result<WriteSummary> {
        let records = flatten_organization(org);
        let partition_key = keys::org_pk(&org.name);
        let records_written = records.len();

        tracing::info!(
            pk = %partition_key,
            records = records_written,
            concurrency = self.ingest_concurrency,
            "Writing organization"
        );

        if self.ingest_concurrency <= 1 {
            for record in records {
                self.put_record(record).await?;
            }
        } else {
            // One write per key; the last record in traversal order wins.
            stream::iter(last_write_per_key(records).into_iter().map(Ok))
                .try_for_each_concurrent(self.ingest_concurrency, |record| {
                    self.put_record(record)
                })
                .await?;
        }

        Ok(WriteSummary {
            partition_key,
            records_written,
        })
    }

    async fn put_record(&self, record: Record) -> Result<()> {
        let (pk, sk) = (record.pk.clone(), record.sk.clone());
        self.store.put(record).await.inspect_err(|e| {
            tracing::warn!(pk = %pk, sk = %sk, error = %e, "Record write failed");
        })
    }

    // ========================================================================
    // Read path
    // ========================================================================

    /// Gets an organization's metadata record, or an empty record if absent.
    pub async fn get_metadata(&self, org_id: &str) -> Result<NormalizedRecord> {
        self.get_by_exact_key(org_id, keys::METADATA_SK).await
    }

    /// Gets the record at `(org_id, sort_key)`, or an empty record if absent.
    pub async fn get_by_exact_key(&self, org_id: &str, sort_key: &str) -> Result<NormalizedRecord> {
        let key = RecordKey::new(org_id, sort_key);
        let record = self.store.get(&key).await?;

        tracing::debug!(key = %key, found = record.is_some(), "Exact lookup");
        Ok(record
            .as_ref()
            .map(normalize_record)
            .unwrap_or_default())
    }

    /// Scans every record of one entity type within a partition.
    ///
    /// Records come back in the order the store yields them.
    pub async fn list_by_prefix(
        &self,
        org_id: &str,
        kind: EntityKind,
    ) -> Result<Vec<NormalizedRecord>> {
        let records = self.store.query(org_id, kind.prefix()).await?;

        tracing::debug!(pk = org_id, prefix = kind.prefix(), count = records.len(), "Prefix scan");
        Ok(records.iter().map(normalize_record).collect())
    }

    pub async fn get_department(&self, org_id: &str, dept_name: &str) -> Result<NormalizedRecord> {
        self.get_by_exact_key(org_id, &keys::department_sk(dept_name))
            .await
    }

    pub async fn list_departments(&self, org_id: &str) -> Result<Vec<NormalizedRecord>> {
        self.list_by_prefix(org_id, EntityKind::Department).await
    }

    pub async fn list_projects(&self, org_id: &str) -> Result<Vec<NormalizedRecord>> {
        self.list_by_prefix(org_id, EntityKind::Project).await
    }

    /// Every employee in the organization, regardless of project.
    pub async fn list_employees(&self, org_id: &str) -> Result<Vec<NormalizedRecord>> {
        self.list_by_prefix(org_id, EntityKind::Employee).await
    }

    pub async fn list_managers(&self, org_id: &str) -> Result<Vec<NormalizedRecord>> {
        self.list_by_prefix(org_id, EntityKind::Manager).await
    }

    /// Resolves a project's `employees` reference list.
    ///
    /// Membership is only recorded on the project record. References whose
    /// employee record is missing are skipped, and a missing project yields
    /// no employees.
    pub async fn project_employees(
        &self,
        org_id: &str,
        project_name: &str,
    ) -> Result<Vec<NormalizedRecord>> {
        let key = RecordKey::new(org_id, keys::project_sk(project_name));
        let Some(project) = self.store.get(&key).await? else {
            return Ok(Vec::new());
        };

        let mut employees = Vec::new();
        for reference in project.references("employees") {
            match self.store.get(&RecordKey::new(org_id, reference.as_str())).await? {
                Some(employee) => employees.push(normalize_record(&employee)),
                None => tracing::debug!(pk = org_id, sk = %reference, "Dangling reference"),
            }
        }
        Ok(employees)
    }

    /// Reads back the full report for one organization.
    pub async fn build_report(&self, org_id: &str, dept_name: &str) -> Result<OrgReport> {
        Ok(OrgReport {
            organization_metadata: self.get_metadata(org_id).await?,
            departments: self.list_departments(org_id).await?,
            department: self.get_department(org_id, dept_name).await?,
            projects: self.list_projects(org_id).await?,
            employees: self.list_employees(org_id).await?,
            managers: self.list_managers(org_id).await?,
        })
    }
}

/// Keeps the last record for each key, in first-seen key order.
fn last_write_per_key(records: Vec<Record>) -> Vec<Record> {
    let mut slots: HashMap<RecordKey, usize> = HashMap::new();
    let mut deduped: Vec<Record> = Vec::with_capacity(records.len());

    for record in records {
        match slots.get(&record.key()) {
            Some(&slot) => deduped[slot] = record,
            None => {
                slots.insert(record.key(), deduped.len());
                deduped.push(record);
            }
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::inmemory::InMemoryItemStore;
    use crate::storage::testing::FailingStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use orgtable_core::organization::{
        sample_organization, Department, Employee, Manager, Project, Task,
    };
    use orgtable_core::storage::{AttrValue, FailureKind, StoreError};
    use rust_decimal::Decimal;
    use serde_json::json;

    const CODEX: &str = "ORG#CodexOrg";

    async fn seeded() -> KeyedItemStore {
        let store = KeyedItemStore::new(Arc::new(InMemoryItemStore::new()));
        store
            .write_organization(&sample_organization())
            .await
            .unwrap();
        store
    }

    fn manager(name: &str) -> Manager {
        Manager {
            id: 1,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            experience: "1 year".to_string(),
            certifications: vec![],
        }
    }

    #[tokio::test]
    async fn test_write_summary() {
        let store = KeyedItemStore::new(Arc::new(InMemoryItemStore::new()));
        let summary = store
            .write_organization(&sample_organization())
            .await
            .unwrap();

        assert_eq!(summary.partition_key, CODEX);
        assert_eq!(summary.records_written, 7);
    }

    #[tokio::test]
    async fn test_metadata_matches_input() {
        let store = seeded().await;
        let metadata = store.get_metadata(CODEX).await.unwrap();

        assert_eq!(metadata["name"], "CodexOrg");
        assert_eq!(metadata["location"], "Bangalore");
        assert_eq!(metadata["founded"], json!(1998));
        assert!(metadata["founded"].is_i64());
    }

    #[tokio::test]
    async fn test_missing_metadata_is_empty_record() {
        let store = seeded().await;
        let metadata = store.get_metadata("ORG#Nobody").await.unwrap();
        assert!(metadata.is_empty());
    }

    #[tokio::test]
    async fn test_department_listing_has_unique_sort_keys() {
        let store = seeded().await;
        let departments = store.list_departments(CODEX).await.unwrap();

        let mut sks: Vec<_> = departments
            .iter()
            .map(|d| d["SK"].as_str().unwrap().to_string())
            .collect();
        sks.sort();

        assert_eq!(sks, vec!["DEPT#Engineering", "DEPT#Marketing"]);
    }

    #[tokio::test]
    async fn test_employee_scan_returns_tasks() {
        let store = seeded().await;
        let employees = store.list_employees(CODEX).await.unwrap();

        assert_eq!(employees.len(), 1);
        let john = &employees[0];
        assert_eq!(john["name"], "John");
        assert_eq!(john["role"], "Software Engineer");
        assert_eq!(john["tasks"][0]["status"], "In Progress");
        assert_eq!(john["tasks"][1]["status"], "Pending");
        assert!(john["tasks"][0]["id"].is_i64());
    }

    #[tokio::test]
    async fn test_missing_department_is_empty_record() {
        let store = seeded().await;
        let sales = store.get_department(CODEX, "Sales").await.unwrap();
        assert!(sales.is_empty());
    }

    #[tokio::test]
    async fn test_manager_record_keeps_certifications() {
        let store = seeded().await;
        let managers = store.list_managers(CODEX).await.unwrap();
        let johnson = managers.iter().find(|m| m["name"] == "Johnson").unwrap();

        assert_eq!(
            johnson["certifications"],
            json!(["PMP", "AWS Certified Solutions Architect"])
        );
        assert_eq!(johnson["id"], json!(101));
    }

    #[tokio::test]
    async fn test_department_without_projects_yields_empty_scans() {
        let store = KeyedItemStore::new(Arc::new(InMemoryItemStore::new()));
        let org = Organization::new("Tiny", "Lisbon", 2010)
            .with_department(Department::new("Ops", manager("Ana")));
        store.write_organization(&org).await.unwrap();

        assert!(store.list_projects("ORG#Tiny").await.unwrap().is_empty());
        assert!(store.list_employees("ORG#Tiny").await.unwrap().is_empty());
        assert_eq!(store.list_departments("ORG#Tiny").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_budget_normalization() {
        let store = KeyedItemStore::new(Arc::new(InMemoryItemStore::new()));
        let deadline = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let dept = Department::new("R&D", manager("Kim"))
            .with_project(Project::new("Whole", Decimal::from(500_000), deadline))
            .with_project(Project::new("Cents", Decimal::new(50_000_050, 2), deadline));
        let org = Organization::new("Budgets", "Oslo", 2001).with_department(dept);
        store.write_organization(&org).await.unwrap();

        let whole = store
            .get_by_exact_key("ORG#Budgets", "PROJ#Whole")
            .await
            .unwrap();
        let cents = store
            .get_by_exact_key("ORG#Budgets", "PROJ#Cents")
            .await
            .unwrap();

        assert!(whole["budget"].is_i64());
        assert_eq!(whole["budget"], json!(500000));
        assert!(cents["budget"].is_f64());
        assert_eq!(cents["budget"].as_f64(), Some(500000.5));
        assert_eq!(whole["deadline"], "2026-06-30");
    }

    #[tokio::test]
    async fn test_rewrite_overwrites_lists() {
        let inner = Arc::new(InMemoryItemStore::new());
        let store = KeyedItemStore::new(inner.clone());

        let mut org = sample_organization();
        store.write_organization(&org).await.unwrap();

        let engineering = &mut org.departments[0];
        engineering.manager.certifications = vec!["CISSP".to_string()];
        engineering.projects[0].employees[0].tasks = vec![Task {
            id: 499,
            description: "Ship it".to_string(),
            status: "Done".to_string(),
        }];
        store.write_organization(&org).await.unwrap();

        assert_eq!(inner.record_count().await, 7);

        let johnson = store.get_by_exact_key(CODEX, "MGR#Johnson").await.unwrap();
        assert_eq!(johnson["certifications"], json!(["CISSP"]));

        let john = store.get_by_exact_key(CODEX, "EMP#John").await.unwrap();
        assert_eq!(
            john["tasks"],
            json!([{"id": 499, "description": "Ship it", "status": "Done"}])
        );
    }

    #[tokio::test]
    async fn test_concurrent_ingest_matches_sequential() {
        let sequential = seeded().await;
        let concurrent = KeyedItemStore::new(Arc::new(InMemoryItemStore::new()))
            .with_ingest_concurrency(4);
        concurrent
            .write_organization(&sample_organization())
            .await
            .unwrap();

        assert_eq!(
            sequential.build_report(CODEX, "Engineering").await.unwrap(),
            concurrent.build_report(CODEX, "Engineering").await.unwrap()
        );
    }

    /// Holds writes of records whose `role` is "first" long enough for later
    /// writes to land before them.
    #[derive(Clone, Default)]
    struct SlowFirstRole {
        inner: InMemoryItemStore,
    }

    #[async_trait]
    impl ItemStore for SlowFirstRole {
        async fn put(&self, record: Record) -> Result<()> {
            if record.get("role").and_then(AttrValue::as_s) == Some("first") {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            }
            self.inner.put(record).await
        }

        async fn get(&self, key: &RecordKey) -> Result<Option<Record>> {
            self.inner.get(key).await
        }

        async fn query(&self, pk: &str, sk_prefix: &str) -> Result<Vec<Record>> {
            self.inner.query(pk, sk_prefix).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_ingest_keeps_last_duplicate() {
        let deadline = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let john = |role: &str| Employee {
            id: 1,
            name: "John".to_string(),
            role: role.to_string(),
            tasks: vec![],
        };
        let org = Organization::new("Dup", "Nowhere", 2000).with_department(
            Department::new("Engineering", manager("Ada"))
                .with_project(
                    Project::new("A", Decimal::from(1), deadline).with_employee(john("first")),
                )
                .with_project(
                    Project::new("B", Decimal::from(2), deadline).with_employee(john("second")),
                ),
        );

        let mut roles = Vec::new();
        for concurrency in [1, 4] {
            let store = KeyedItemStore::new(Arc::new(SlowFirstRole::default()))
                .with_ingest_concurrency(concurrency);
            store.write_organization(&org).await.unwrap();

            let john = store.get_by_exact_key("ORG#Dup", "EMP#John").await.unwrap();
            roles.push(john["role"].clone());
        }

        assert_eq!(roles, vec![json!("second"), json!("second")]);
    }

    #[test]
    fn test_last_write_per_key() {
        let records = vec![
            Record::new(RecordKey::new("p", "EMP#John")).with("role", "first"),
            Record::new(RecordKey::new("p", "EMP#Jane")).with("role", "only"),
            Record::new(RecordKey::new("p", "EMP#John")).with("role", "second"),
        ];

        let deduped = last_write_per_key(records);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].sk, "EMP#John");
        assert_eq!(deduped[0].get("role").and_then(AttrValue::as_s), Some("second"));
        assert_eq!(deduped[1].sk, "EMP#Jane");
    }

    #[tokio::test]
    async fn test_project_employees_skips_dangling_references() {
        let inner = Arc::new(InMemoryItemStore::new());
        let store = KeyedItemStore::new(inner.clone());
        store
            .write_organization(&sample_organization())
            .await
            .unwrap();

        // Reference an employee that was never written.
        let project = inner
            .get(&RecordKey::new(CODEX, "PROJ#AI Development"))
            .await
            .unwrap()
            .unwrap()
            .with(
                "employees",
                orgtable_core::storage::AttrValue::string_list(["EMP#John", "EMP#Ghost"]),
            );
        inner.put(project).await.unwrap();

        let employees = store
            .project_employees(CODEX, "AI Development")
            .await
            .unwrap();

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0]["name"], "John");
        assert!(store
            .project_employees(CODEX, "Unknown")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_employee_scan_is_not_project_scoped() {
        let store = KeyedItemStore::new(Arc::new(InMemoryItemStore::new()));
        let deadline = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let employee = |name: &str| Employee {
            id: 1,
            name: name.to_string(),
            role: "Engineer".to_string(),
            tasks: vec![],
        };
        let dept = Department::new("Eng", manager("Max"))
            .with_project(
                Project::new("A", Decimal::from(1), deadline).with_employee(employee("Ann")),
            )
            .with_project(
                Project::new("B", Decimal::from(2), deadline).with_employee(employee("Bob")),
            );
        let org = Organization::new("Two", "Rome", 1990).with_department(dept);
        store.write_organization(&org).await.unwrap();

        assert_eq!(store.list_employees("ORG#Two").await.unwrap().len(), 2);
        let only_a = store.project_employees("ORG#Two", "A").await.unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0]["name"], "Ann");
    }

    #[tokio::test]
    async fn test_report_sections() {
        let store = seeded().await;
        let report = store.build_report(CODEX, "Engineering").await.unwrap();

        assert_eq!(report.organization_metadata["name"], "CodexOrg");
        assert_eq!(report.departments.len(), 2);
        assert_eq!(report.department["projects"], json!(["PROJ#AI Development"]));
        assert_eq!(report.department["manager"]["name"], "Johnson");
        assert_eq!(report.projects.len(), 1);
        assert_eq!(report.employees.len(), 1);
        assert_eq!(report.managers.len(), 2);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_with_cause() {
        let store = KeyedItemStore::new(Arc::new(FailingStore::new(FailureKind::Throttled)));

        let read = store.list_departments(CODEX).await.unwrap_err();
        let write = store
            .write_organization(&sample_organization())
            .await
            .unwrap_err();

        assert_eq!(read.failure_kind(), Some(FailureKind::Throttled));
        assert!(matches!(write, StoreError::Unavailable(_)));
    }

    /// Accepts a fixed number of writes, then fails every call.
    struct FailAfter {
        inner: InMemoryItemStore,
        remaining: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl ItemStore for FailAfter {
        async fn put(&self, record: Record) -> Result<()> {
            use std::sync::atomic::Ordering;
            if self
                .remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_err()
            {
                return Err(FailingStore::new(FailureKind::Network).failure());
            }
            self.inner.put(record).await
        }

        async fn get(&self, key: &RecordKey) -> Result<Option<Record>> {
            self.inner.get(key).await
        }

        async fn query(&self, pk: &str, sk_prefix: &str) -> Result<Vec<Record>> {
            self.inner.query(pk, sk_prefix).await
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_partial_tree() {
        let inner = InMemoryItemStore::new();
        let failing = FailAfter {
            inner: inner.clone(),
            remaining: std::sync::atomic::AtomicUsize::new(3),
        };
        let store = KeyedItemStore::new(Arc::new(failing));

        let result = store.write_organization(&sample_organization()).await;
        assert!(result.is_err());

        // Metadata, Engineering and Johnson were written; the project was not,
        // yet the department still references it.
        assert_eq!(inner.record_count().await, 3);
        let engineering = store.get_department(CODEX, "Engineering").await.unwrap();
        assert_eq!(engineering["projects"], json!(["PROJ#AI Development"]));
        assert_eq!(
            store.list_projects(CODEX).await.unwrap(),
            Vec::<NormalizedRecord>::new()
        );
    }
}
