//! Error types for the `gitee-connector` crate.
//!
//! A root Error struct holds an error kind plus an optional source for error
//! chaining. Each kind identifies the pipeline stage or subsystem that failed,
//! which is what the host needs to surface a login failure to the end user.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for the connector.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in the connector.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Http(HttpErrorKind),
}

/// Errors from the login pipeline. Each variant is terminal for the current
/// login attempt; the connector never retries a failed stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OAuthErrorKind {
    /// The authorization-code-for-token exchange failed.
    CodeExchangeFailed,
    /// The bearer-authenticated profile fetch failed.
    ProfileFetchFailed,
    /// The bearer-authenticated email fetch failed.
    EmailFetchFailed,
    /// The callback carried an unknown, expired, or already-used state token.
    InvalidState,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper function to create OAuth errors from a plain message.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Helper function to create OAuth errors wrapping an underlying cause.
pub fn oauth_error_from(
    kind: OAuthErrorKind,
    source: impl StdError + Send + Sync + 'static,
) -> Error {
    Error {
        source: Some(Box::new(source)),
        error_kind: ErrorKind::OAuth(kind),
    }
}
