use thiserror::Error;

/// Errors that can occur while parsing or validating node configurations.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to parse node config JSON: {0}")]
    JsonParse(String),
}

/// Errors that can occur while interpreting a SCHEDULE configuration.
#[derive(Error, Debug, Clone)]
pub enum ScheduleError {
    #[error("Unknown timezone '{timezone}'")]
    InvalidTimezone { timezone: String },

    #[error("Invalid cron expression '{expression}': {message}")]
    InvalidCron { expression: String, message: String },

    #[error("Field '{field}' holds '{value}', which is not an ISO-8601 timestamp")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// Errors surfaced by the remote persistence layer during a canvas save.
///
/// These are never fatal: `reconcile` collects them into a report and leaves
/// the local optimistic state untouched so the user can retry.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    #[error("Remote call failed: {0}")]
    Remote(String),

    #[error("Request payload could not be encoded: {0}")]
    Encode(String),
}
