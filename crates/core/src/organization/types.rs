use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root of the ingest graph. Every record written for it shares the
/// partition key `ORG#<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub location: String,
    /// Year the organization was founded.
    pub founded: i64,
    pub departments: Vec<Department>,
}

impl Organization {
    /// Creates an organization with no departments.
    pub fn new(name: impl Into<String>, location: impl Into<String>, founded: i64) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            founded,
            departments: Vec::new(),
        }
    }

    /// Appends a department.
    pub fn with_department(mut self, department: Department) -> Self {
        self.departments.push(department);
        self
    }
}

/// A department and the manager that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub manager: Manager,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Department {
    /// Creates a department with no projects.
    pub fn new(name: impl Into<String>, manager: Manager) -> Self {
        Self {
            name: name.into(),
            manager,
            projects: Vec::new(),
        }
    }

    /// Appends a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Free text, e.g. "15 years".
    pub experience: String,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Currency amount. Accepts JSON numbers or numeric strings.
    pub budget: Decimal,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Project {
    /// Creates a project with no employees.
    pub fn new(name: impl Into<String>, budget: Decimal, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            budget,
            deadline,
            employees: Vec::new(),
        }
    }

    /// Appends an employee.
    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.employees.push(employee);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: String,
}
