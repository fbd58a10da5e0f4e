//! # itrlog-testkit
//!
//! In-memory sinks and cores for tests.
//! This crate depends on `ports` only.

pub mod in_memory;

pub use in_memory::{MemorySink, RecordingCore};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
