//! Contract tests: in-memory adapters behave like the ports promise.

use itrlog_ports::{Field, Level, LogCore, LogRecord, LogSink};
use itrlog_testkit::{MemorySink, RecordingCore};
use std::sync::Arc;
use std::thread;

#[test]
fn recording_core_honours_default_enabled() {
    let core = RecordingCore::new(Level::Error);
    for level in Level::ALL {
        assert_eq!(core.enabled(level), level >= Level::Error, "{level}");
    }
}

#[test]
fn records_keep_field_order() {
    let core = RecordingCore::default();
    core.write(&LogRecord::new(
        Level::Info,
        "ordered",
        vec![Field::int("z", 1), Field::int("a", 2)],
    ));

    let records = core.take();
    let keys: Vec<&str> = records[0].fields.iter().map(Field::key).collect();
    assert_eq!(keys, vec!["z", "a"]);
}

#[test]
fn memory_sink_accepts_concurrent_writers() {
    let sink = Arc::new(MemorySink::default());
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for index in 0..25 {
                    sink.write_line(&format!("{{\"worker\":{worker},\"index\":{index}}}\n"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    assert_eq!(sink.json_lines().len(), 100);
}
