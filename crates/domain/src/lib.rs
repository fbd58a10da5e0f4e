//! # itrlog-domain
//!
//! Domain types for structured logging:
//!
//! - **Levels** - `Level`, ordered `Debug` through `Fatal`
//! - **Fields** - `Field` (validated key/value), `Arg` (loosely typed call argument)
//! - **Normalization** - `normalize`, which pairs up raw arguments and
//!   diverts malformed ones into `Diagnostic`s
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod field;
pub mod level;
pub mod normalize;

pub use field::{Arg, Field, InvalidPair};
pub use level::{Level, LevelParseError};
pub use normalize::{
    DANGLING_KEY_MESSAGE, Diagnostic, NON_STRING_KEYS_MESSAGE, Normalized, normalize,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
