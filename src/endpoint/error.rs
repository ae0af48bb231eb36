//! Error types for event forwarding.

use std::sync::Arc;

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for normalization of raw header inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A header entry contained no `:` separator.
    #[error("Invalid header format '{entry}': expected 'Key: Value'")]
    MissingSeparator {
        /// The offending raw entry
        entry: String,
    },
}

/// Describes a failure to send a POST request to an endpoint.
///
/// The underlying transport error is shared, so the same failure can be
/// returned to the caller and emitted on the output channel without copying
/// it into a string.
#[derive(Debug, Clone, Error)]
#[error("Failed to POST event: {source}")]
pub struct FailedToPostError {
    #[source]
    source: Arc<HttpError>,
}

impl FailedToPostError {
    pub(crate) fn new(source: HttpError) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Returns the underlying transport error.
    #[must_use]
    pub fn transport_error(&self) -> &HttpError {
        &self.source
    }
}

/// Error type for a single forwarding attempt.
///
/// The non-[`Post`](Self::Post) variants are request-construction errors:
/// they are returned synchronously, are fatal for that event, and never
/// reach the output channel.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The client's forward URL failed to parse.
    #[error("Invalid forward URL '{url}': {source}")]
    InvalidUrl {
        /// The configured URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// A configured header key is not a valid HTTP header name.
    #[error("Invalid header name '{name}': {source}")]
    InvalidHeaderName {
        /// The offending header key
        name: String,
        /// Underlying validation error
        #[source]
        source: http::header::InvalidHeaderName,
    },

    /// A configured header value is not a valid HTTP header value.
    #[error("Invalid header value for '{name}': {source}")]
    InvalidHeaderValue {
        /// The header key the value belongs to
        name: String,
        /// Underlying validation error
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    /// The transport failed to deliver the request.
    ///
    /// The same failure is also emitted to the output channel, when one
    /// is configured.
    #[error(transparent)]
    Post(#[from] FailedToPostError),
}
