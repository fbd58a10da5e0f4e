//! Log file naming and timestamp formats.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// `strftime` layout of the `ts` field in encoded records.
pub const LOG_TIME_FORMAT: &str = "%b-%d-%Y %I:%M:%S %p";

/// `strftime` layout of the date embedded in the active file name.
pub const LOG_FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// `strftime` layout of the timestamp embedded in rotated backup names.
pub const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// Extension of every log file.
pub const LOG_FILE_EXTENSION: &str = "log";

/// File name of the active log for `date`: `<prefix><YYYY-MM-DD>.log`.
#[must_use]
pub fn log_file_name(file_prefix: &str, date: NaiveDate) -> String {
    format!(
        "{file_prefix}{}.{LOG_FILE_EXTENSION}",
        date.format(LOG_FILE_DATE_FORMAT)
    )
}

/// Full path of the active log file for `date`.
#[must_use]
pub fn log_file_path(folder: impl AsRef<Path>, file_prefix: &str, date: NaiveDate) -> PathBuf {
    folder.as_ref().join(log_file_name(file_prefix, date))
}
