mod error;
mod flatten;
mod http_mapping;
pub mod keys;
mod normalize;
mod traits;
mod types;

pub use error::{FailureKind, Result, StoreError, StoreFailure};
pub use flatten::{
    department_record, employee_record, flatten_organization, manager_record,
    organization_record, project_record,
};
pub use http_mapping::store_error_to_status_code;
pub use keys::{EntityKind, RecordKey, UnknownEntityKind};
pub use normalize::{normalize, normalize_big_number, normalize_number, normalize_record};
pub use traits::ItemStore;
pub use types::{AttrValue, Attributes, Record};
