//! Severity levels.

use itrlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Verbose diagnostics, usually disabled in production.
    Debug,
    /// Default enabled level.
    #[default]
    Info,
    /// Something unexpected that does not stop the caller.
    Warn,
    /// A failure the caller handled.
    Error,
    /// A failure that panics in development mode only.
    #[serde(rename = "dpanic")]
    DPanic,
    /// Records, then panics.
    Panic,
    /// Records, then terminates the process.
    Fatal,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Self; 7] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::DPanic,
        Self::Panic,
        Self::Fatal,
    ];

    /// Lower-case name used in encoded records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// Levels at `DPanic` and above carry a termination side effect and are
    /// never skipped by the disabled-level fast path.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::DPanic | Self::Panic | Self::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown log level: {:?}", self.input)
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("domain", "invalid_level"), message)
            .with_metadata("input", error.input)
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| LevelParseError {
                input: input.to_string(),
            })
    }
}
