//! Entity flattening for the write path.
//!
//! Turns one nested [`Organization`] into the flat record set stored under its
//! partition key. Pure: the caller decides how the records are written.

use crate::organization::{Department, Employee, Manager, Organization, Project, Task};

use super::keys::{self, RecordKey};
use super::types::{AttrValue, Attributes, Record};

/// Flattens an organization into records in traversal order.
///
/// Order: metadata, then per department the department record, its manager,
/// and for each project the project record followed by its employees.
/// Reference lists (`projects`, `employees`) name whatever sub-entities are
/// present here; nothing checks that the referenced records get written.
pub fn flatten_organization(org: &Organization) -> Vec<Record> {
    let org_pk = keys::org_pk(&org.name);
    let mut records = vec![organization_record(&org_pk, org)];

    for dept in &org.departments {
        records.push(department_record(&org_pk, dept));
        records.push(manager_record(&org_pk, &dept.manager));

        for project in &dept.projects {
            records.push(project_record(&org_pk, project));
            records.extend(
                project
                    .employees
                    .iter()
                    .map(|employee| employee_record(&org_pk, employee)),
            );
        }
    }

    records
}

/// `(ORG#<name>, METADATA)`: name, location, founded.
pub fn organization_record(org_pk: &str, org: &Organization) -> Record {
    Record::new(RecordKey::metadata(org_pk))
        .with("name", org.name.as_str())
        .with("location", org.location.as_str())
        .with("founded", org.founded)
}

/// `(ORG#<name>, DEPT#<dept>)`: name, embedded manager, project references.
pub fn department_record(org_pk: &str, dept: &Department) -> Record {
    Record::new(RecordKey::new(org_pk, keys::department_sk(&dept.name)))
        .with("name", dept.name.as_str())
        .with("manager", AttrValue::M(manager_attributes(&dept.manager)))
        .with(
            "projects",
            AttrValue::string_list(dept.projects.iter().map(|p| keys::project_sk(&p.name))),
        )
}

/// `(ORG#<name>, MGR#<manager>)`: id, name, email, experience, certifications.
pub fn manager_record(org_pk: &str, manager: &Manager) -> Record {
    let mut record = Record::new(RecordKey::new(org_pk, keys::manager_sk(&manager.name)));
    record.attributes = manager_attributes(manager);
    record
}

/// `(ORG#<name>, PROJ#<project>)`: name, budget, deadline, employee references.
pub fn project_record(org_pk: &str, project: &Project) -> Record {
    Record::new(RecordKey::new(org_pk, keys::project_sk(&project.name)))
        .with("name", project.name.as_str())
        .with("budget", project.budget)
        .with("deadline", project.deadline.format("%Y-%m-%d").to_string())
        .with(
            "employees",
            AttrValue::string_list(project.employees.iter().map(|e| keys::employee_sk(&e.name))),
        )
}

/// `(ORG#<name>, EMP#<employee>)`: id, name, role, tasks.
pub fn employee_record(org_pk: &str, employee: &Employee) -> Record {
    Record::new(RecordKey::new(org_pk, keys::employee_sk(&employee.name)))
        .with("id", employee.id)
        .with("name", employee.name.as_str())
        .with("role", employee.role.as_str())
        .with(
            "tasks",
            AttrValue::L(employee.tasks.iter().map(task_value).collect()),
        )
}

fn manager_attributes(manager: &Manager) -> Attributes {
    Attributes::from([
        ("id".to_string(), AttrValue::from(manager.id)),
        ("name".to_string(), AttrValue::from(manager.name.as_str())),
        ("email".to_string(), AttrValue::from(manager.email.as_str())),
        (
            "experience".to_string(),
            AttrValue::from(manager.experience.as_str()),
        ),
        (
            "certifications".to_string(),
            AttrValue::string_list(manager.certifications.iter().cloned()),
        ),
    ])
}

fn task_value(task: &Task) -> AttrValue {
    AttrValue::M(Attributes::from([
        ("id".to_string(), AttrValue::from(task.id)),
        (
            "description".to_string(),
            AttrValue::from(task.description.as_str()),
        ),
        ("status".to_string(), AttrValue::from(task.status.as_str())),
    ]))
}
