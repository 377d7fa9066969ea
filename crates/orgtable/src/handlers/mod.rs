pub mod error;
pub mod health;
pub mod organizations;

pub use error::AppError;
