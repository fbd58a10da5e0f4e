//! In-memory adapter implementations for port contracts.
//!
//! These implementations are intended for:
//! - unit and integration tests of the façade
//! - asserting on exactly what reached the core or the sink

use itrlog_ports::{Level, LogCore, LogRecord, LogSink};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    flushes: AtomicUsize,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.guard())
    }

    /// Captured lines parsed as JSON. Panics on a malformed line.
    pub fn json_lines(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .map(|line| serde_json::from_str(line.trim_end()).expect("sink line is JSON"))
            .collect()
    }

    /// Number of `flush` calls seen.
    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.guard().push(line.to_string());
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Core that records every enabled [`LogRecord`] unencoded.
#[derive(Debug)]
pub struct RecordingCore {
    min_level: Level,
    records: Mutex<Vec<LogRecord>>,
    syncs: AtomicUsize,
}

impl Default for RecordingCore {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl RecordingCore {
    /// Create a core enabled from `min_level`.
    pub fn new(min_level: Level) -> Self {
        Self {
            min_level,
            records: Mutex::new(Vec::new()),
            syncs: AtomicUsize::new(0),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Snapshot of the recorded records.
    pub fn records(&self) -> Vec<LogRecord> {
        self.guard().clone()
    }

    /// Drain the recorded records.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.guard())
    }

    /// Messages of the recorded records, in order.
    pub fn messages(&self) -> Vec<String> {
        self.guard().iter().map(|record| record.message.clone()).collect()
    }

    /// Number of `sync` calls seen.
    pub fn syncs(&self) -> usize {
        self.syncs.load(Ordering::SeqCst)
    }
}

impl LogCore for RecordingCore {
    fn min_level(&self) -> Level {
        self.min_level
    }

    fn write(&self, record: &LogRecord) {
        if self.enabled(record.level) {
            self.guard().push(record.clone());
        }
    }

    fn sync(&self) {
        self.syncs.fetch_add(1, Ordering::SeqCst);
    }
}
