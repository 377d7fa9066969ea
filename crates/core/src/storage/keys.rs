//! Partition and sort key generation.
//!
//! Pure functions following the single-table layout: every record of an
//! organization lives under `ORG#<name>`, and the sort key is a type tag
//! followed by the entity's natural name.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Key prefixes
// ============================================================================

pub const ORG_PREFIX: &str = "ORG#";
pub const METADATA_SK: &str = "METADATA";
pub const DEPT_PREFIX: &str = "DEPT#";
pub const MGR_PREFIX: &str = "MGR#";
pub const PROJ_PREFIX: &str = "PROJ#";
pub const EMP_PREFIX: &str = "EMP#";

/// Attribute name holding the partition key.
pub const PK_ATTR: &str = "PK";
/// Attribute name holding the sort key.
pub const SK_ATTR: &str = "SK";

// ============================================================================
// Key builders
// ============================================================================

/// Pattern: `ORG#<org_name>`
pub fn org_pk(org_name: &str) -> String {
    format!("{ORG_PREFIX}{org_name}")
}

/// Pattern: `DEPT#<dept_name>`
pub fn department_sk(dept_name: &str) -> String {
    format!("{DEPT_PREFIX}{dept_name}")
}

/// Pattern: `MGR#<manager_name>`
pub fn manager_sk(manager_name: &str) -> String {
    format!("{MGR_PREFIX}{manager_name}")
}

/// Pattern: `PROJ#<project_name>`
///
/// Also the reference string stored in a department's `projects` list.
pub fn project_sk(project_name: &str) -> String {
    format!("{PROJ_PREFIX}{project_name}")
}

/// Pattern: `EMP#<employee_name>`
///
/// Also the reference string stored in a project's `employees` list.
pub fn employee_sk(employee_name: &str) -> String {
    format!("{EMP_PREFIX}{employee_name}")
}

// ============================================================================
// Record keys
// ============================================================================

/// Full primary key of one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub pk: String,
    pub sk: String,
}

impl RecordKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            sk: sk.into(),
        }
    }

    /// Key of an organization's metadata record.
    pub fn metadata(org_pk: impl Into<String>) -> Self {
        Self::new(org_pk, METADATA_SK)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.pk, self.sk)
    }
}

// ============================================================================
// Entity kinds
// ============================================================================

/// Entity types reachable by a sort-key prefix scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Department,
    Manager,
    Project,
    Employee,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Department,
        EntityKind::Manager,
        EntityKind::Project,
        EntityKind::Employee,
    ];

    /// Sort-key prefix that selects this entity type within a partition.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Department => DEPT_PREFIX,
            EntityKind::Manager => MGR_PREFIX,
            EntityKind::Project => PROJ_PREFIX,
            EntityKind::Employee => EMP_PREFIX,
        }
    }

    /// Sort key of the named entity of this type.
    pub fn sort_key(self, name: &str) -> String {
        format!("{}{name}", self.prefix())
    }

    /// Lowercase plural used in URLs.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Department => "departments",
            EntityKind::Manager => "managers",
            EntityKind::Project => "projects",
            EntityKind::Employee => "employees",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Error returned when a string names no known entity kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown entity kind: {0}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts the raw prefix (`DEPT#`) or the plural name (`departments`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| s == kind.prefix() || s.eq_ignore_ascii_case(kind.plural()))
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}
