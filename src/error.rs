// THEORY:
// The grouping, zoom and expansion operations are total over their inputs and
// never fail. Errors only arise at the edges, when a configuration is built or
// a user-supplied color name is parsed.

use thiserror::Error;

/// Result type alias for fallible engine setup.
pub type ClusterResult<T> = Result<T, ClusterError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// A configuration value is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A color name did not match any supported color tag.
    #[error("Unknown color: {0} (expected red, yellow or green)")]
    UnknownColor(String),

    /// An environment override could not be parsed as a number.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnvVar { name: String, value: String },
}
