//! Error types for gate configuration.

use std::io;

use thiserror::Error;

/// Primary error type for configuration loading and compilation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A client pattern failed to compile as a regular expression.
    #[error("invalid client pattern '{pattern}'")]
    InvalidPattern {
        /// Pattern source string as supplied by the operator.
        pattern: String,
        /// Underlying regex compilation error.
        source: regex::Error,
    },
    /// The identifying-header name was not a well-formed header name.
    #[error("invalid client header name '{name}'")]
    InvalidClientHeader {
        /// Header name as supplied by the operator.
        name: String,
        /// Underlying header-name parse error.
        source: http::header::InvalidHeaderName,
    },
    /// The challenge realm contained characters that cannot appear in a
    /// quoted `WWW-Authenticate` parameter.
    #[error("invalid challenge realm '{realm}': {reason}")]
    InvalidRealm {
        /// Realm as supplied by the operator.
        realm: String,
        /// Machine-readable reason for the rejection.
        reason: &'static str,
    },
    /// The configuration file could not be read.
    #[error("failed to read configuration file '{path}'")]
    Io {
        /// Path of the file that failed to read.
        path: String,
        /// Source IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file '{path}'")]
    Parse {
        /// Path of the file that failed to parse.
        path: String,
        /// Source JSON error.
        source: serde_json::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
