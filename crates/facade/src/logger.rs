//! Leveled logging façade over a [`LogCore`].

use itrlog_adapters::{JsonCore, RotatingFileSink};
use itrlog_config::LoggerConfig;
use itrlog_domain::{Arg, Diagnostic, Field, Level, normalize};
use itrlog_ports::{LogCore, LogRecord};
use itrlog_shared::Result;
use std::fmt::{self, Display, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a `Fatal` record does after it has been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FatalAction {
    /// Exit the process with status 1.
    #[default]
    Exit,
    /// Panic with the record's message instead of exiting.
    Panic,
}

/// Logging handle: configuration plus a shared core.
///
/// Cheap to clone; clones share the core and its sink.
#[derive(Clone)]
pub struct Logger {
    config: Arc<LoggerConfig>,
    core: Arc<dyn LogCore>,
    log_file: Option<PathBuf>,
    context: Arc<[Field]>,
    fatal_action: FatalAction,
}

/// Build a logger writing JSON lines to
/// `<folder>/<file_prefix><YYYY-MM-DD>.log`, enabled from `Info`.
///
/// Inputs are used as given; a zero size is treated as 100 MB by the sink.
/// The file is opened on the first write.
pub fn init_log(max_size_mb: u32, max_age_days: u32, folder: &str, file_prefix: &str) -> Logger {
    Logger::from_parts(LoggerConfig::new(
        max_size_mb,
        max_age_days,
        folder,
        file_prefix,
    ))
}

impl Logger {
    /// Validate and normalize `config`, then build a file-backed logger.
    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        let config = config.validate_and_normalize()?;
        Ok(Self::from_parts(config.into_inner()))
    }

    /// Logger over a host-supplied core. No log file is associated.
    pub fn with_core(config: LoggerConfig, core: Arc<dyn LogCore>) -> Self {
        Self {
            config: Arc::new(config),
            core,
            log_file: None,
            context: Arc::from([]),
            fatal_action: FatalAction::Exit,
        }
    }

    pub(crate) fn from_parts(config: LoggerConfig) -> Self {
        let sink = Arc::new(RotatingFileSink::from_config(&config));
        let log_file = sink.path().to_path_buf();
        let core = JsonCore::new(sink)
            .with_min_level(config.min_level)
            .with_redaction(config.redact_secret_fields);
        Self {
            log_file: Some(log_file),
            ..Self::with_core(config, Arc::new(core))
        }
    }

    /// Replace the action taken after a `Fatal` record.
    #[must_use]
    pub const fn with_fatal_action(mut self, action: FatalAction) -> Self {
        self.fatal_action = action;
        self
    }

    /// Configuration this logger was built from.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Active log file, when the logger owns a file sink.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Whether records at `level` reach the core.
    pub fn level_enabled(&self, level: Level) -> bool {
        self.core.enabled(level)
    }

    /// Child logger that prepends the normalized `args` to every record.
    ///
    /// Malformed arguments are reported through this logger, as for `*w` calls.
    #[must_use]
    pub fn with(&self, args: Vec<Arg>) -> Self {
        let normalized = normalize(args);
        self.report(normalized.diagnostics);
        if normalized.fields.is_empty() {
            return self.clone();
        }

        let context: Arc<[Field]> = self
            .context
            .iter()
            .cloned()
            .chain(normalized.fields)
            .collect();
        Self {
            context,
            ..self.clone()
        }
    }

    /// Flush the sink.
    pub fn sync(&self) {
        self.core.sync();
    }

    /// Log `message` with pre-typed fields, skipping normalization.
    pub fn log(&self, level: Level, message: &str, fields: Vec<Field>) {
        if !self.check(level) {
            return;
        }
        self.emit(level, message.to_string(), fields);
    }

    fn check(&self, level: Level) -> bool {
        level.is_terminal() || self.core.enabled(level)
    }

    fn print(&self, level: Level, args: &[&dyn Display]) {
        if !self.check(level) {
            return;
        }
        let mut message = String::new();
        for arg in args {
            // Writing into a String cannot fail.
            let _ = write!(message, "{arg}");
        }
        self.emit(level, message, Vec::new());
    }

    fn printf(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.check(level) {
            return;
        }
        self.emit(level, fmt::format(args), Vec::new());
    }

    fn printw(&self, level: Level, message: &str, args: Vec<Arg>) {
        if !self.check(level) {
            return;
        }
        let normalized = normalize(args);
        self.report(normalized.diagnostics);
        self.emit(level, message.to_string(), normalized.fields);
    }

    fn report(&self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            let message = diagnostic.message();
            let record = LogRecord::new(
                Level::DPanic,
                message,
                self.with_context(diagnostic.into_fields()),
            );
            self.core.write(&record);
        }
    }

    fn with_context(&self, fields: Vec<Field>) -> Vec<Field> {
        if self.context.is_empty() {
            return fields;
        }
        self.context.iter().cloned().chain(fields).collect()
    }

    fn emit(&self, level: Level, message: String, fields: Vec<Field>) {
        let record = LogRecord::new(level, message, self.with_context(fields));
        self.core.write(&record);
        if level.is_terminal() {
            self.terminate(level, record.message);
        }
    }

    fn terminate(&self, level: Level, message: String) {
        self.core.sync();
        match level {
            Level::DPanic if self.config.development => std::panic::panic_any(message),
            Level::Panic => std::panic::panic_any(message),
            Level::Fatal => match self.fatal_action {
                FatalAction::Exit => std::process::exit(1),
                FatalAction::Panic => std::panic::panic_any(message),
            },
            _ => {},
        }
    }
}

macro_rules! leveled_methods {
    ($($level:ident => $plain:ident, $formatted:ident, $keyed:ident;)*) => {
        impl Logger {
            $(
                #[doc = concat!("Log at `", stringify!($level), "`, concatenating `args` without separators.")]
                ///
                /// No space is inserted between operands, even when neither is a
                /// string: `&[&1, &2]` logs `"12"`, not `"1 2"`.
                pub fn $plain(&self, args: &[&dyn Display]) {
                    self.print(Level::$level, args);
                }

                #[doc = concat!("Log a formatted message at `", stringify!($level), "`.")]
                ///
                /// Formatting is deferred until the level is known to be needed.
                pub fn $formatted(&self, args: fmt::Arguments<'_>) {
                    self.printf(Level::$level, args);
                }

                #[doc = concat!("Log `message` at `", stringify!($level), "` with loosely typed key/value `args`.")]
                pub fn $keyed(&self, message: &str, args: Vec<Arg>) {
                    self.printw(Level::$level, message, args);
                }
            )*
        }
    };
}

leveled_methods! {
    Debug => debug, debugf, debugw;
    Info => info, infof, infow;
    Warn => warn, warnf, warnw;
    Error => error, errorf, errorw;
    DPanic => dpanic, dpanicf, dpanicw;
    Panic => panic, panicf, panicw;
    Fatal => fatal, fatalf, fatalw;
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("config", &self.config)
            .field("log_file", &self.log_file)
            .field("context", &self.context)
            .field("fatal_action", &self.fatal_action)
            .finish_non_exhaustive()
    }
}
