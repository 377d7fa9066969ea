mod report;
mod sample_data;
mod types;

pub use report::{InvocationResponse, NormalizedRecord, OrgReport, STORE_FAILURE_MESSAGE};
pub use sample_data::sample_organization;
pub use types::{Department, Employee, Manager, Organization, Project, Task};
