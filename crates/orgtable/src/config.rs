use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Target table name (default: "orgtable")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub table_name: String,
    /// Maximum writes in flight during ingest (default: 1, sequential)
    pub ingest_concurrency: usize,
    /// Department read back by the report (default: "Engineering")
    pub report_department: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE` - Table holding every organization record (default: "orgtable")
    /// - `INGEST_CONCURRENCY` - Concurrent record writes per ingest (default: 1)
    /// - `REPORT_DEPARTMENT` - Department named in reports (default: "Engineering")
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE").unwrap_or_else(|_| "orgtable".to_string()),
            ingest_concurrency: env::var("INGEST_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(1),
            report_department: env::var("REPORT_DEPARTMENT")
                .unwrap_or_else(|_| "Engineering".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
