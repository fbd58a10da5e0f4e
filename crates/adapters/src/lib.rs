//! # itrlog-adapters
//!
//! Adapter implementations for the ports: the JSON encoder core and the
//! size-rotated file sink.
//! This crate depends on `ports`, `config`, and `shared`; domain types arrive
//! through the `ports` re-exports.

pub mod error;
pub mod log_sink;
pub mod logger;

pub use error::SinkError;
pub use log_sink::RotatingFileSink;
pub use logger::JsonCore;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
