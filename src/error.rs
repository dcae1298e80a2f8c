//! Unified error type.

use std::fmt;

use tracing::dispatcher::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;

/// The error type returned by httplib's fallible operations.
///
/// Request-level failures never reach the handler: an unencodable payload
/// becomes a 500 fallback response, an unparseable peer address becomes an
/// empty IP and an invalid cookie is dropped with a warning. Beyond logging
/// setup, the only producer is [`CookieOptions::to_header_value`].
///
/// [`CookieOptions::to_header_value`]: crate::CookieOptions::to_header_value
#[derive(Debug)]
pub enum Error {
    /// The filter directive (e.g. `RUST_LOG`) could not be parsed.
    Filter(ParseError),
    /// `LOG_FORMAT` named a format that does not exist.
    Format(String),
    /// A global subscriber was already installed.
    Init(SetGlobalDefaultError),
    /// A cookie name is empty or not an HTTP token.
    CookieName(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(e) => write!(f, "invalid log filter: {e}"),
            Self::Format(s) => write!(f, "unknown log format `{s}` (expected full, compact, pretty or json)"),
            Self::Init(e)   => write!(f, "logging init: {e}"),
            Self::CookieName(n) => write!(f, "invalid cookie name {n:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(e) => Some(e),
            Self::Format(_) => None,
            Self::Init(e)   => Some(e),
            Self::CookieName(_) => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Filter(e)
    }
}

impl From<SetGlobalDefaultError> for Error {
    fn from(e: SetGlobalDefaultError) -> Self {
        Self::Init(e)
    }
}
