//! # itrlog-ports
//!
//! Port traits between the logging façade and its collaborators.
//!
//! - [`LogCore`]: turns a [`LogRecord`] into a serialized line if its level is enabled
//! - [`LogSink`]: durable destination for serialized lines
//!
//! This crate depends only on `domain` and `shared`.

pub mod logger;
pub mod sink;

pub use logger::{LogCore, LogRecord};
pub use sink::LogSink;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `itrlog-domain`.
pub use itrlog_domain::{Field, Level};

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use itrlog_domain::domain_crate_version;
    use itrlog_shared::shared_crate_version;
    use std::sync::Mutex;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]" || line == "[dev-dependencies]";
                continue;
            }
            if in_deps && line.starts_with("itrlog-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn ports_depends_only_on_domain_and_shared() {
        let deps = workspace_deps();
        let allowed = ["itrlog-domain", "itrlog-shared"];

        for dep in &deps {
            assert!(
                allowed.contains(&dep.as_str()),
                "unexpected dependency found: {dep}"
            );
        }
    }

    #[test]
    fn ports_can_use_domain_and_shared() {
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
    }

    struct WarnCore {
        written: Mutex<Vec<LogRecord>>,
    }

    impl LogCore for WarnCore {
        fn min_level(&self) -> Level {
            Level::Warn
        }

        fn write(&self, record: &LogRecord) {
            if self.enabled(record.level) {
                if let Ok(mut guard) = self.written.lock() {
                    guard.push(record.clone());
                }
            }
        }
    }

    #[test]
    fn default_enabled_compares_against_min_level() {
        let core = WarnCore {
            written: Mutex::new(Vec::new()),
        };
        assert!(!core.enabled(Level::Info));
        assert!(core.enabled(Level::Warn));
        assert!(core.enabled(Level::Fatal));

        core.write(&LogRecord::new(Level::Debug, "skipped", Vec::new()));
        core.write(&LogRecord::new(
            Level::Error,
            "kept",
            vec![Field::int("attempt", 2)],
        ));
        core.sync();

        let written = core.written.lock().map(|guard| guard.clone()).unwrap_or_default();
        assert_eq!(written.len(), 1);
        assert_eq!(written.first().map(|record| record.message.as_str()), Some("kept"));
    }
}
