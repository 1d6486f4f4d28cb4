//! Error type shared by parsing and composition.

use thiserror::Error;

/// Failure while parsing or composing a URL.
///
/// Query decoding never produces one of these; malformed query strings are
/// decoded leniently instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The input could not be split into URL components (bad scheme, host or port).
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: &'static str },
    /// Nothing to compose: both base and overrides are empty.
    #[error("invalid arguments: {0}")]
    InvalidArguments(&'static str),
    /// A textual merge flag name was not recognized.
    #[error("unknown merge flag {0:?}")]
    UnknownFlag(String),
}

impl UrlError {
    pub(crate) fn invalid_url(input: &str, reason: &'static str) -> Self {
        UrlError::InvalidUrl {
            input: input.to_string(),
            reason,
        }
    }
}
