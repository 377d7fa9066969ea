//! Bundled sample organization.
//!
//! Used by the `invoke` command and by tests that need a realistic tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{Department, Employee, Manager, Organization, Project, Task};

const AI_DEVELOPMENT_DEADLINE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 12, 31) {
    Some(date) => date,
    None => panic!("invalid sample deadline"),
};

/// Builds the `CodexOrg` sample organization.
///
/// Engineering (manager Johnson) owns the "AI Development" project with one
/// employee carrying two tasks. Marketing (manager Lee) has no projects.
pub fn sample_organization() -> Organization {
    let john = Employee {
        id: 201,
        name: "John".to_string(),
        role: "Software Engineer".to_string(),
        tasks: vec![
            Task {
                id: 401,
                description: "Develop API".to_string(),
                status: "In Progress".to_string(),
            },
            Task {
                id: 402,
                description: "Write Unit Tests".to_string(),
                status: "Pending".to_string(),
            },
        ],
    };

    let ai_development = Project::new(
        "AI Development",
        Decimal::from(500_000),
        AI_DEVELOPMENT_DEADLINE,
    )
    .with_employee(john);

    let engineering = Department::new(
        "Engineering",
        Manager {
            id: 101,
            name: "Johnson".to_string(),
            email: "johnson@codexorg.com".to_string(),
            experience: "15 years".to_string(),
            certifications: vec![
                "PMP".to_string(),
                "AWS Certified Solutions Architect".to_string(),
            ],
        },
    )
    .with_project(ai_development);

    let marketing = Department::new(
        "Marketing",
        Manager {
            id: 103,
            name: "Lee".to_string(),
            email: "lee@codexorg.com".to_string(),
            experience: "10 years".to_string(),
            certifications: vec![
                "Google Ads Certified".to_string(),
                "HubSpot Inbound Marketing".to_string(),
            ],
        },
    );

    Organization::new("CodexOrg", "Bangalore", 1998)
        .with_department(engineering)
        .with_department(marketing)
}
