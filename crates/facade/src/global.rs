//! Process-wide default logger.
//!
//! The default handle is built with [`LoggerConfig::default`] on first access
//! and can be swapped at any time. Callers holding an `Arc<Logger>` from
//! before a swap keep using the old handle; new calls see the new one.

use crate::logger::Logger;
use itrlog_config::LoggerConfig;
use itrlog_domain::{Arg, Field, Level};
use std::fmt::{self, Display};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static DEFAULT: LazyLock<RwLock<Arc<Logger>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Logger::from_parts(LoggerConfig::default()))));

/// Current default logger.
pub fn logger() -> Arc<Logger> {
    let guard = DEFAULT.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

/// Replace the default logger, substituting defaults for a zero size and
/// blank folder or prefix. A zero age keeps backups forever.
pub fn reconfigure(
    max_size_mb: u32,
    max_age_days: u32,
    folder: &str,
    file_prefix: &str,
) -> Arc<Logger> {
    reconfigure_with(LoggerConfig::new(
        max_size_mb,
        max_age_days,
        folder,
        file_prefix,
    ))
}

/// Replace the default logger with one built from `config` after normalization.
pub fn reconfigure_with(config: LoggerConfig) -> Arc<Logger> {
    let logger = Logger::from_parts(config.normalize());
    tracing::info!(
        max_size_mb = logger.config().max_size_mb,
        max_age_days = logger.config().max_age_days,
        folder = %logger.config().folder,
        file_prefix = %logger.config().file_prefix,
        "reconfigured default logger"
    );
    set_logger(logger)
}

/// Install `logger` as the default and return the shared handle.
pub fn set_logger(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    let mut guard = DEFAULT.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Arc::clone(&logger);
    logger
}

/// Flush the default logger's sink.
pub fn sync() {
    logger().sync();
}

/// Log with pre-typed fields on the default logger.
pub fn log(level: Level, message: &str, fields: Vec<Field>) {
    logger().log(level, message, fields);
}

macro_rules! global_functions {
    ($($plain:ident, $formatted:ident, $keyed:ident;)*) => {
        $(
            #[doc = concat!("[`Logger::", stringify!($plain), "`] on the default logger.")]
            pub fn $plain(args: &[&dyn Display]) {
                logger().$plain(args);
            }

            #[doc = concat!("[`Logger::", stringify!($formatted), "`] on the default logger.")]
            pub fn $formatted(args: fmt::Arguments<'_>) {
                logger().$formatted(args);
            }

            #[doc = concat!("[`Logger::", stringify!($keyed), "`] on the default logger.")]
            pub fn $keyed(message: &str, args: Vec<Arg>) {
                logger().$keyed(message, args);
            }
        )*
    };
}

global_functions! {
    debug, debugf, debugw;
    info, infof, infow;
    warn, warnf, warnw;
    error, errorf, errorw;
    dpanic, dpanicf, dpanicw;
    panic, panicf, panicw;
    fatal, fatalf, fatalw;
}
