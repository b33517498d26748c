//! The error type returned by the race pipeline.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a run. There is no partial report: the first
/// error aborts the whole computation.
#[derive(Debug, Error)]
pub enum RaceError {
    /// A provider's log could not be read.
    #[error("can't read the log for provider '{provider}' ({})", path.display())]
    InputUnavailable {
        /// Provider name
        provider: String,
        /// File the log was expected in
        path: PathBuf,
        /// Underlying I/O failure
        source: io::Error,
    },
    /// A line of a provider's log doesn't have the expected shape.
    #[error("provider '{provider}', line {line_number}: {reason}: {line:?}")]
    MalformedLine {
        /// Provider name
        provider: String,
        /// 1-based line number within the provider's log
        line_number: usize,
        /// The offending line, lossily decoded
        line: String,
        /// What was wrong with it
        reason: MalformedReason,
    },
}

/// Why a line was rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// No tab between the hash and the metadata
    #[error("no tab separating the hash from the metadata")]
    MissingSeparator,
    /// The metadata field has no `Timestamp:` marker
    #[error("no `Timestamp:` marker in the metadata")]
    MissingMarker,
    /// The token after the marker isn't a date/time
    #[error("can't parse timestamp {0:?}")]
    BadTimestamp(String),
}

/// Result type used across the library.
pub type Result<T> = std::result::Result<T, RaceError>;
