//! Error type shared by the library and the binary.
//!
//! Runtime failures (network, malformed response JSON) are recovered by the
//! detector and surfaced as verdicts. Only the CLI variants ever reach the
//! process exit code.

use thiserror::Error;

/// Errors returned by library functions.
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions, reason = "exported for tests")]
pub enum DetectorError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("malformed response JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("Invalid JSON in expected response")]
    InvalidExpected(#[source] serde_json::Error),
    #[error("invalid header '{header}': {reason}")]
    InvalidHeader { header: String, reason: String },
}

impl DetectorError {
    /// Whether the error means the API could not be reached at all.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::InvalidUrl { .. } | Self::UnsupportedScheme { .. }
        )
    }
}
