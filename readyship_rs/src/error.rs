//! Error types shared across readyship.
//!
//! The state machines themselves never fail; everything here comes from the
//! configuration boundary (empty item lists, zero durations, bad epochs) or
//! from the tokio driver.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A display sequence was configured with no items.
    #[error("display sequence `{name}` has no items")]
    EmptySequence { name: String },

    /// A hold/fade/interval duration that would stall or spin a component.
    #[error("invalid timing for `{section}`: {reason}")]
    InvalidTiming {
        section: &'static str,
        reason: String,
    },

    /// The counter epoch is not an RFC 3339 timestamp.
    #[error("invalid counter epoch `{value}`: {source}")]
    InvalidEpoch {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The driver task panicked or was aborted before teardown finished.
    #[cfg(feature = "runtime")]
    #[error("driver task failed: {0}")]
    Driver(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;
