//! # itrlog-config
//!
//! Logger configuration schema, defaults, validation, and file naming.
//! This crate depends on `domain` and `shared` only.

/// Log file naming and timestamp formats.
pub mod naming;
/// Configuration schema types and helpers.
pub mod schema;

pub use naming::{
    BACKUP_TIME_FORMAT, LOG_FILE_DATE_FORMAT, LOG_FILE_EXTENSION, LOG_TIME_FORMAT, log_file_name,
    log_file_path,
};
pub use schema::{
    ConfigSchemaError, DEFAULT_FILE_PREFIX, DEFAULT_LOG_FOLDER, DEFAULT_MAX_AGE_DAYS,
    DEFAULT_MAX_SIZE_MB, LoggerConfig, ValidatedLoggerConfig, parse_logger_config_json,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
