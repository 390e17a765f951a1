use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across dogcheck crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A reference resource (e.g. the dog names file) could not be read.
    #[error("resource unavailable: {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A fractional statistic was requested with a zero denominator.
    #[error("division by zero while computing {statistic}")]
    DivisionByZero { statistic: &'static str },
    /// The model identifier is not one of the supported architectures.
    #[error("unknown architecture: {0}")]
    UnknownArchitecture(String),
}

/// Convenience alias for results returned by dogcheck crates.
pub type Result<T> = std::result::Result<T, Error>;
