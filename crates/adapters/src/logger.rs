//! Structured JSON core emitting one line per record.

use chrono::Local;
use itrlog_config::LOG_TIME_FORMAT;
use itrlog_ports::{Field, Level, LogCore, LogRecord, LogSink};
use itrlog_shared::redaction::{REDACTED, is_secret_key};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// JSON core writing `{"level","ts","msg","fields"}` lines to a sink.
#[derive(Clone)]
pub struct JsonCore {
    sink: Arc<dyn LogSink>,
    min_level: Level,
    redact: bool,
}

impl JsonCore {
    /// Create a JSON core backed by the provided sink, enabled from `Info`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: Level::Info,
            redact: false,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Blank values of fields whose keys look like secrets.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact = redact;
        self
    }

    /// Encode one record as a newline-terminated JSON line.
    pub fn encode(&self, record: &LogRecord) -> String {
        let ts = Local::now().format(LOG_TIME_FORMAT).to_string();
        let encoded = EncodedRecord {
            level: record.level,
            ts: &ts,
            msg: &record.message,
            fields: &record.fields,
            redact: self.redact,
        };

        serde_json::to_string(&encoded).map_or_else(
            |_| {
                format!(
                    "{{\"level\":\"error\",\"ts\":\"{ts}\",\"msg\":\"log serialization failed\"}}\n"
                )
            },
            |mut line| {
                line.push('\n');
                line
            },
        )
    }
}

impl std::fmt::Debug for JsonCore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("JsonCore")
            .field("min_level", &self.min_level)
            .field("redact", &self.redact)
            .finish_non_exhaustive()
    }
}

impl LogCore for JsonCore {
    fn min_level(&self) -> Level {
        self.min_level
    }

    fn write(&self, record: &LogRecord) {
        if !self.enabled(record.level) {
            return;
        }
        self.sink.write_line(&self.encode(record));
    }

    fn sync(&self) {
        self.sink.flush();
    }
}

struct EncodedRecord<'a> {
    level: Level,
    ts: &'a str,
    msg: &'a str,
    fields: &'a [Field],
    redact: bool,
}

impl Serialize for EncodedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.fields.is_empty() { 3 } else { 4 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("ts", self.ts)?;
        map.serialize_entry("msg", self.msg)?;
        if !self.fields.is_empty() {
            map.serialize_entry(
                "fields",
                &OrderedFields {
                    fields: self.fields,
                    redact: self.redact,
                },
            )?;
        }
        map.end()
    }
}

// Keeps call order; a `serde_json::Map` would sort keys.
struct OrderedFields<'a> {
    fields: &'a [Field],
    redact: bool,
}

impl Serialize for OrderedFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in self.fields {
            if self.redact && is_secret_key(field.key()) {
                map.serialize_entry(field.key(), REDACTED)?;
            } else {
                map.serialize_entry(field.key(), field.value())?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct MemorySink {
        lines: Mutex<Vec<String>>,
    }

    impl MemorySink {
        fn take(&self) -> Vec<String> {
            let mut guard = self.lines.lock().expect("memory sink lock");
            std::mem::take(&mut *guard)
        }
    }

    impl LogSink for MemorySink {
        fn write_line(&self, line: &str) {
            let mut guard = self.lines.lock().expect("memory sink lock");
            guard.push(line.to_string());
        }
    }

    #[test]
    fn encodes_level_ts_msg_and_ordered_fields() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemorySink::default());
        let core = JsonCore::new(sink.clone());

        core.write(&LogRecord::new(
            Level::Warn,
            "disk low",
            vec![Field::int("zeta", 1), Field::string("alpha", "x")],
        ));

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.ends_with('\n'));
        assert!(line.starts_with("{\"level\":\"warn\",\"ts\":"));
        assert!(line.contains("\"fields\":{\"zeta\":1,\"alpha\":\"x\"}"));

        let payload: Value = serde_json::from_str(line.trim())?;
        assert_eq!(payload.get("msg"), Some(&json!("disk low")));
        let ts = payload
            .get("ts")
            .and_then(Value::as_str)
            .ok_or("missing ts")?;
        NaiveDateTime::parse_from_str(ts, LOG_TIME_FORMAT)?;
        Ok(())
    }

    #[test]
    fn omits_empty_fields() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemorySink::default());
        let core = JsonCore::new(sink.clone());
        core.write(&LogRecord::new(Level::Info, "plain", Vec::new()));

        let lines = sink.take();
        let payload: Value = serde_json::from_str(lines[0].trim())?;
        assert!(payload.get("fields").is_none());
        Ok(())
    }

    #[test]
    fn drops_records_below_min_level() {
        let sink = Arc::new(MemorySink::default());
        let core = JsonCore::new(sink.clone()).with_min_level(Level::Error);
        core.write(&LogRecord::new(Level::Warn, "ignored", Vec::new()));
        core.write(&LogRecord::new(Level::Fatal, "kept", Vec::new()));
        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn redaction_blanks_top_level_secret_keys() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemorySink::default());
        let core = JsonCore::new(sink.clone()).with_redaction(true);
        core.write(&LogRecord::new(
            Level::Info,
            "login",
            vec![
                Field::string("apiKey", "secret"), // pragma: allowlist secret
                Field::string("user", "ada"),
                Field::new("invalid", json!([{ "position": 0, "key": 7, "value": "x" }])),
            ],
        ));

        let lines = sink.take();
        let payload: Value = serde_json::from_str(lines[0].trim())?;
        let fields = payload.get("fields").ok_or("missing fields")?;
        assert_eq!(fields.get("apiKey"), Some(&json!(REDACTED)));
        assert_eq!(fields.get("user"), Some(&json!("ada")));
        assert_eq!(
            fields.get("invalid"),
            Some(&json!([{ "position": 0, "key": 7, "value": "x" }]))
        );
        Ok(())
    }

    #[test]
    fn sync_flushes_sink() {
        #[derive(Default)]
        struct CountingSink {
            flushes: Mutex<usize>,
        }

        impl LogSink for CountingSink {
            fn write_line(&self, _line: &str) {}

            fn flush(&self) {
                *self.flushes.lock().expect("flush lock") += 1;
            }
        }

        let sink = Arc::new(CountingSink::default());
        let core = JsonCore::new(sink.clone());
        core.sync();
        assert_eq!(*sink.flushes.lock().expect("flush lock"), 1);
    }
}
