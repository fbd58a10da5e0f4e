//! Formatting and argument-list macros for the default logger.
//!
//! The `*f!` macros pass `format_args!` straight through, so nothing is
//! formatted when the level is disabled.

/// Build a loosely typed argument list for the `*w` methods.
///
/// ```
/// let args = itrlog::kv!["user", "ada", "attempt", 3];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Format and log at `Debug` on the default logger.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::global::debugf(::std::format_args!($($arg)+))
    };
}

/// Format and log at `Info` on the default logger.
///
/// ```no_run
/// itrlog::infof!("listening on {}:{}", "0.0.0.0", 8080);
/// ```
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::global::infof(::std::format_args!($($arg)+))
    };
}

/// Format and log at `Warn` on the default logger.
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::global::warnf(::std::format_args!($($arg)+))
    };
}

/// Format and log at `Error` on the default logger.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::global::errorf(::std::format_args!($($arg)+))
    };
}

/// Format and log at `DPanic` on the default logger.
#[macro_export]
macro_rules! dpanicf {
    ($($arg:tt)+) => {
        $crate::global::dpanicf(::std::format_args!($($arg)+))
    };
}

/// Format and log at `Panic` on the default logger, then panic.
#[macro_export]
macro_rules! panicf {
    ($($arg:tt)+) => {
        $crate::global::panicf(::std::format_args!($($arg)+))
    };
}

/// Format and log at `Fatal` on the default logger, then exit.
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::global::fatalf(::std::format_args!($($arg)+))
    };
}
