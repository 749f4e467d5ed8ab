use thiserror::Error;

use crate::interval::GoDuration;

/// Errors raised while configuring a generator or producing a query.
///
/// The `Display` output of the domain-parameter variants is matched verbatim by callers of the
/// benchmark harness, so the wording must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("number of {kind}s cannot be < 1; got {requested}")]
    TooFewTags {
        kind: &'static str,
        requested: usize,
    },

    #[error("number of {kind}s ({requested}) larger than total {kind}s. See --scale ({scale})")]
    TooManyTags {
        kind: &'static str,
        requested: usize,
        scale: usize,
    },

    #[error("cannot get 0 metrics")]
    NoMetrics,

    #[error("too many metrics asked for")]
    TooManyMetrics,

    #[error("random window equal to or larger than TimeInterval: window {window}, interval {interval}")]
    WindowTooLarge {
        window: GoDuration,
        interval: GoDuration,
    },

    #[error("invalid time interval: end {end} must be after start {start}")]
    InvalidInterval { start: String, end: String },

    #[error("timestamp {0} cannot be represented in nanoseconds since the epoch")]
    TimestampOutOfRange(String),

    #[error("scale must be at least 1")]
    InvalidScale,

    #[error("unknown format {0:?}")]
    UnknownFormat(String),

    #[error("format {format:?} does not support use case {use_case}")]
    UnsupportedUseCase { format: String, use_case: String },

    #[error("unknown query type {0:?}")]
    UnknownQueryType(String),

    #[error("query type {query_type:?} belongs to use case {expected}, not {actual}")]
    QueryTypeMismatch {
        query_type: String,
        expected: String,
        actual: String,
    },

    #[error("number of queries must be at least 1")]
    NoQueries,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
