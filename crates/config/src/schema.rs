//! Logger configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde`; every field has a default so partial
//!   configs are accepted.
//! - `normalize` substitutes defaults for zero/blank inputs and never fails.
//! - `validate_and_normalize` additionally enforces bounds and returns typed
//!   errors mapped to `ErrorEnvelope`.

use itrlog_domain::Level;
use itrlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default rotation size in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u32 = 100;
/// Default maximum backup age in days (0 keeps backups forever).
pub const DEFAULT_MAX_AGE_DAYS: u32 = 0;
/// Default log folder.
pub const DEFAULT_LOG_FOLDER: &str = "logs";
/// Default log file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "itrlog_";

const MAX_SIZE_MB_MIN: u32 = 1;
const MAX_SIZE_MB_MAX: u32 = 1_048_576;
const MAX_AGE_DAYS_MAX: u32 = 36_500;

/// Configuration of one logger façade and its sink.
///
/// Immutable once a logger is built from it; reconfiguring builds a new
/// logger with a new sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggerConfig {
    /// Size in megabytes after which the log file is rotated.
    pub max_size_mb: u32,
    /// Days to keep rotated backups; 0 keeps them forever.
    pub max_age_days: u32,
    /// Folder holding the log files.
    pub folder: String,
    /// File name prefix; the date and `.log` are appended.
    pub file_prefix: String,
    /// Lowest level written to the sink.
    pub min_level: Level,
    /// Development mode: `DPanic` records panic after being written.
    pub development: bool,
    /// Replace values of secret-looking field keys with a placeholder.
    pub redact_secret_fields: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            folder: DEFAULT_LOG_FOLDER.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            min_level: Level::default(),
            development: false,
            redact_secret_fields: false,
        }
    }
}

impl LoggerConfig {
    /// Build a config from the four rotation inputs, leaving the rest at defaults.
    pub fn new(
        max_size_mb: u32,
        max_age_days: u32,
        folder: impl Into<String>,
        file_prefix: impl Into<String>,
    ) -> Self {
        Self {
            max_size_mb,
            max_age_days,
            folder: folder.into(),
            file_prefix: file_prefix.into(),
            ..Self::default()
        }
    }

    /// Set the minimum enabled level.
    #[must_use]
    pub const fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Enable or disable development mode.
    #[must_use]
    pub const fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Enable or disable secret field redaction.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact_secret_fields = redact;
        self
    }

    /// Substitute defaults for a zero size and blank folder or prefix.
    ///
    /// A zero age is left alone: it already means "keep forever".
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.max_size_mb == 0 {
            self.max_size_mb = DEFAULT_MAX_SIZE_MB;
        }
        if self.folder.trim().is_empty() {
            DEFAULT_LOG_FOLDER.clone_into(&mut self.folder);
        }
        if self.file_prefix.trim().is_empty() {
            DEFAULT_FILE_PREFIX.clone_into(&mut self.file_prefix);
        }
        self
    }

    /// Normalize, then validate bounds and naming rules.
    pub fn validate_and_normalize(self) -> Result<ValidatedLoggerConfig, ConfigSchemaError> {
        let config = self.normalize();

        if !(MAX_SIZE_MB_MIN..=MAX_SIZE_MB_MAX).contains(&config.max_size_mb) {
            return Err(ConfigSchemaError::LimitOutOfRange {
                field: "maxSizeMb",
                value: u64::from(config.max_size_mb),
                min: u64::from(MAX_SIZE_MB_MIN),
                max: u64::from(MAX_SIZE_MB_MAX),
            });
        }
        if config.max_age_days > MAX_AGE_DAYS_MAX {
            return Err(ConfigSchemaError::LimitOutOfRange {
                field: "maxAgeDays",
                value: u64::from(config.max_age_days),
                min: 0,
                max: u64::from(MAX_AGE_DAYS_MAX),
            });
        }
        if config.folder.contains('\0') {
            return Err(ConfigSchemaError::InvalidFolder {
                folder: config.folder,
            });
        }
        if config
            .file_prefix
            .chars()
            .any(|ch| ch == '/' || ch == '\\' || ch == '\0')
        {
            return Err(ConfigSchemaError::InvalidFilePrefix {
                prefix: config.file_prefix,
            });
        }

        Ok(ValidatedLoggerConfig { raw: config })
    }
}

/// Parse a JSON logger config, then validate and normalize it.
///
/// Parse failures map to `config:invalid_json`; validation failures keep
/// their own codes.
pub fn parse_logger_config_json(input: &str) -> Result<ValidatedLoggerConfig, ErrorEnvelope> {
    let config: LoggerConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("failed to parse logger config: {error}"),
        )
        .with_metadata("line", error.line().to_string())
        .with_metadata("column", error.column().to_string())
    })?;
    Ok(config.validate_and_normalize()?)
}

/// Config that passed [`LoggerConfig::validate_and_normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoggerConfig {
    raw: LoggerConfig,
}

impl ValidatedLoggerConfig {
    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggerConfig {
        self.raw
    }
}

impl AsRef<LoggerConfig> for ValidatedLoggerConfig {
    fn as_ref(&self) -> &LoggerConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggerConfig {
    type Target = LoggerConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Typed config validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Field name in the config (e.g. `maxSizeMb`).
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
    /// The folder cannot be used as a path.
    InvalidFolder {
        /// Rejected folder.
        folder: String,
    },
    /// The prefix would escape the folder or is not a valid file name part.
    InvalidFilePrefix {
        /// Rejected prefix.
        prefix: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "invalid_limit"),
            Self::InvalidFolder { .. } => ErrorCode::new("config", "invalid_folder"),
            Self::InvalidFilePrefix { .. } => ErrorCode::new("config", "invalid_file_prefix"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitOutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{field} must be within [{min}, {max}] (got {value})"
            ),
            Self::InvalidFolder { folder } => write!(formatter, "invalid log folder: {folder:?}"),
            Self::InvalidFilePrefix { prefix } => {
                write!(formatter, "invalid log file prefix: {prefix:?}")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::LimitOutOfRange {
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::InvalidFolder { folder } => envelope.with_metadata("folder", folder),
            ConfigSchemaError::InvalidFilePrefix { prefix } => {
                envelope.with_metadata("prefix", prefix)
            },
        }
    }
}
