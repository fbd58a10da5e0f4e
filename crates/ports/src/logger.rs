//! Encoder/core boundary contract.

use itrlog_domain::{Field, Level};

/// One record handed from the façade to a core.
///
/// The timestamp is not part of the record; cores stamp it when encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Severity.
    pub level: Level,
    /// Resolved message text.
    pub message: String,
    /// Validated fields, in call order.
    pub fields: Vec<Field>,
}

impl LogRecord {
    /// Build a record.
    pub fn new(level: Level, message: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            level,
            message: message.into(),
            fields,
        }
    }
}

/// Boundary contract for the component that serializes records and forwards
/// them to a sink.
pub trait LogCore: Send + Sync {
    /// Lowest level this core records.
    fn min_level(&self) -> Level;

    /// Whether a record at `level` would be written.
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level()
    }

    /// Encode and write one record. Implementations drop records below
    /// [`min_level`](Self::min_level) and never report failures to the caller.
    fn write(&self, record: &LogRecord);

    /// Flush buffered output to durable storage.
    fn sync(&self) {}
}
