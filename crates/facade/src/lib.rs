//! # itrlog
//!
//! Leveled structured logging façade.
//!
//! - [`Logger`]: explicit handle with plain, formatted, and key/value methods
//!   for every [`Level`]
//! - [`global`]: process-wide default handle, swappable with [`reconfigure`]
//! - key/value arguments are normalized into [`Field`]s; malformed pairs are
//!   reported as `dpanic` records instead of failing the caller
//!
//! ```no_run
//! use itrlog::{Field, Level, kv};
//!
//! let logger = itrlog::init_log(10, 7, "logs", "svc_");
//! logger.infow("user signed in", kv!["user", "ada", "attempt", 2]);
//! logger.log(Level::Warn, "slow request", vec![Field::uint("ms", 1250)]);
//! logger.sync();
//! ```
//!
//! This crate depends on `adapters`, `config`, `domain`, `ports`, and `shared`.

pub mod global;
pub mod logger;
mod macros;

pub use global::{logger, reconfigure, reconfigure_with, set_logger, sync};
pub use logger::{FatalAction, Logger, init_log};

pub use itrlog_adapters::{JsonCore, RotatingFileSink, SinkError};
pub use itrlog_config::{
    DEFAULT_FILE_PREFIX, DEFAULT_LOG_FOLDER, DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_SIZE_MB,
    LOG_FILE_DATE_FORMAT, LOG_TIME_FORMAT, LoggerConfig, ValidatedLoggerConfig,
};
pub use itrlog_domain::{
    Arg, DANGLING_KEY_MESSAGE, Diagnostic, Field, InvalidPair, Level, NON_STRING_KEYS_MESSAGE,
    Normalized, normalize,
};
pub use itrlog_ports::{LogCore, LogRecord, LogSink};
pub use itrlog_shared::ErrorEnvelope;

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
