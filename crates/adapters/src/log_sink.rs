//! Size-rotated log file sink.
//!
//! The active file is opened lazily on the first write, creating its folder if
//! needed and appending to an existing file. When a write would push the file
//! past the size limit, the file is renamed to
//! `<stem>-<YYYY-MM-DDTHH-MM-SS.mmm>.log` (local time) and a fresh file takes
//! its place. A backup name already taken within the same millisecond gets a
//! `-1`, `-2`, ... suffix. Backups older than the age limit are removed after
//! each rotation.

use crate::error::SinkError;
use chrono::{Local, NaiveDateTime, TimeDelta};
use itrlog_config::{BACKUP_TIME_FORMAT, LOG_FILE_EXTENSION, LoggerConfig, log_file_path};
use itrlog_ports::LogSink;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

const MEGABYTE: u64 = 1024 * 1024;
const DEFAULT_MAX_BYTES: u64 = 100 * MEGABYTE;

#[derive(Debug, Default)]
struct ActiveFile {
    file: Option<File>,
    size: u64,
}

/// File sink with size-based rotation and age-based backup pruning.
#[derive(Debug)]
pub struct RotatingFileSink {
    path: PathBuf,
    max_bytes: u64,
    max_age_days: u32,
    state: Mutex<ActiveFile>,
}

impl RotatingFileSink {
    /// Sink writing to `path`.
    ///
    /// `max_bytes == 0` uses the 100 MB default; `max_age_days == 0` keeps
    /// backups forever. Nothing is touched on disk until the first write.
    pub fn new(path: impl Into<PathBuf>, max_bytes: u64, max_age_days: u32) -> Self {
        Self {
            path: path.into(),
            max_bytes: if max_bytes == 0 {
                DEFAULT_MAX_BYTES
            } else {
                max_bytes
            },
            max_age_days,
            state: Mutex::new(ActiveFile::default()),
        }
    }

    /// Sink for `<folder>/<file_prefix><today>.log` with the config's limits.
    pub fn from_config(config: &LoggerConfig) -> Self {
        let path = log_file_path(
            &config.folder,
            &config.file_prefix,
            Local::now().date_naive(),
        );
        Self::new(
            path,
            u64::from(config.max_size_mb).saturating_mul(MEGABYTE),
            config.max_age_days,
        )
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rotation limit in bytes.
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Append `bytes`, rotating first if they would not fit.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, SinkError> {
        let length = bytes.len() as u64;
        if length > self.max_bytes {
            return Err(SinkError::WriteTooLarge {
                length,
                max: self.max_bytes,
            });
        }

        let mut state = self.lock();
        if state.file.is_none() {
            self.open_existing_or_new(&mut state, length)?;
        }
        if state.size.saturating_add(length) > self.max_bytes {
            self.rotate(&mut state)?;
        }

        let Some(file) = state.file.as_mut() else {
            return Ok(0);
        };
        file.write_all(bytes)?;
        state.size = state.size.saturating_add(length);
        Ok(bytes.len())
    }

    /// Close the active file and start a new one, keeping the old as a backup.
    pub fn rotate_now(&self) -> Result<(), SinkError> {
        let mut state = self.lock();
        self.rotate(&mut state)
    }

    /// Flush the active file, if open.
    pub fn flush_file(&self) -> Result<(), SinkError> {
        let mut state = self.lock();
        if let Some(file) = state.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, ActiveFile> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn open_existing_or_new(&self, state: &mut ActiveFile, incoming: u64) -> Result<(), SinkError> {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return self.open_new(state);
        };
        if metadata.len().saturating_add(incoming) > self.max_bytes {
            return self.rotate(state);
        }

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| SinkError::Open {
                path: self.path.clone(),
                source,
            })?;
        state.file = Some(file);
        state.size = metadata.len();
        Ok(())
    }

    fn open_new(&self, state: &mut ActiveFile) -> Result<(), SinkError> {
        if let Some(folder) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(folder).map_err(|source| SinkError::CreateDirectory {
                path: folder.to_path_buf(),
                source,
            })?;
        }

        if self.path.exists() {
            let backup = self.unused_backup_path(Local::now().naive_local());
            fs::rename(&self.path, &backup).map_err(|source| SinkError::Rotate {
                path: self.path.clone(),
                backup: backup.clone(),
                source,
            })?;
            tracing::debug!(
                path = %self.path.display(),
                backup = %backup.display(),
                "rotated log file"
            );
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|source| SinkError::Open {
                path: self.path.clone(),
                source,
            })?;
        state.file = Some(file);
        state.size = 0;
        Ok(())
    }

    fn rotate(&self, state: &mut ActiveFile) -> Result<(), SinkError> {
        if let Some(mut file) = state.file.take() {
            file.flush()?;
        }
        self.open_new(state)?;
        self.prune_backups();
        Ok(())
    }

    fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn backup_path(&self, at: NaiveDateTime, sequence: u32) -> PathBuf {
        let stamp = at.format(BACKUP_TIME_FORMAT);
        let name = if sequence == 0 {
            format!("{}-{stamp}.{LOG_FILE_EXTENSION}", self.stem())
        } else {
            format!("{}-{stamp}-{sequence}.{LOG_FILE_EXTENSION}", self.stem())
        };
        self.path.with_file_name(name)
    }

    // `fs::rename` replaces its target, so never hand out a taken name.
    fn unused_backup_path(&self, at: NaiveDateTime) -> PathBuf {
        let mut sequence = 0;
        let mut backup = self.backup_path(at, sequence);
        while backup.exists() {
            sequence += 1;
            backup = self.backup_path(at, sequence);
        }
        backup
    }

    /// Parse the rotation time and sequence out of a backup file name.
    fn backup_time(&self, file_name: &str) -> Option<(NaiveDateTime, u32)> {
        let stamp = file_name
            .strip_prefix(&self.stem())?
            .strip_prefix('-')?
            .strip_suffix(LOG_FILE_EXTENSION)?
            .strip_suffix('.')?;
        if let Ok(at) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT) {
            return Some((at, 0));
        }
        let (stamp, sequence) = stamp.rsplit_once('-')?;
        let sequence = sequence.parse::<u32>().ok().filter(|sequence| *sequence > 0)?;
        let at = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).ok()?;
        Some((at, sequence))
    }

    /// Backups next to the active file, oldest first.
    pub fn backups(&self) -> Vec<PathBuf> {
        let folder = match self.path.parent() {
            Some(folder) if !folder.as_os_str().is_empty() => folder,
            _ => Path::new("."),
        };
        let Ok(entries) = fs::read_dir(folder) else {
            return Vec::new();
        };

        let mut backups: Vec<((NaiveDateTime, u32), PathBuf)> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let at = self.backup_time(&name.to_string_lossy())?;
                Some((at, entry.path()))
            })
            .collect();
        backups.sort_by_key(|(at, _)| *at);
        backups.into_iter().map(|(_, path)| path).collect()
    }

    fn prune_backups(&self) {
        if self.max_age_days == 0 {
            return;
        }
        let Some(max_age) = TimeDelta::try_days(i64::from(self.max_age_days)) else {
            return;
        };
        let cutoff = Local::now().naive_local() - max_age;

        for backup in self.backups() {
            let expired = backup
                .file_name()
                .and_then(|name| self.backup_time(&name.to_string_lossy()))
                .is_some_and(|(at, _)| at < cutoff);
            if !expired {
                continue;
            }
            if let Err(error) = fs::remove_file(&backup) {
                tracing::error!(
                    path = %backup.display(),
                    error = %error,
                    "failed to remove expired log backup"
                );
            }
        }
    }
}

impl LogSink for RotatingFileSink {
    fn write_line(&self, line: &str) {
        if let Err(error) = self.write(line.as_bytes()) {
            tracing::error!(
                path = %self.path.display(),
                error = %error,
                "log sink write failed"
            );
        }
    }

    fn flush(&self) {
        if let Err(error) = self.flush_file() {
            tracing::error!(
                path = %self.path.display(),
                error = %error,
                "log sink flush failed"
            );
        }
    }
}
