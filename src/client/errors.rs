//! Error types for the request engine.
//!
//! The engine distinguishes three terminal outcomes a caller can observe:
//!
//! - [`RequestError::ContextNotSet`]: the engine was used before an execution
//!   context was bound; no network I/O took place.
//! - [`TransportError::Status`]: the server answered with a non-2xx status
//!   that is not a throttle signal; propagated verbatim, body uninterpreted.
//! - [`TransportError::Network`] / [`TransportError::Io`]: no HTTP response
//!   at all, or the caller's sink failed mid-stream; propagated verbatim.
//!
//! Throttled responses (429/503) never surface as errors; the engine absorbs
//! them in its retry loop.

use std::collections::HashMap;

use thiserror::Error;

/// Error returned when a request receives a non-successful HTTP response.
///
/// The engine does not interpret the response body; `body` carries the raw
/// payload text for the command layer to format. Header names are lowercased.
#[derive(Debug, Error)]
#[error("Request failed with status {status}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, String>,
    /// The raw response body text.
    pub body: String,
}

/// Error returned when a request descriptor fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// The target URL is not an absolute endpoint.
    #[error("Invalid request URL '{url}'. Expected an absolute http(s) endpoint.")]
    RelativeUrl {
        /// The URL that was provided.
        url: String,
    },
}

/// Failure raised by a [`Transport`](crate::client::Transport) attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Status(#[from] HttpResponseError),

    /// The exchange failed without an HTTP response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Writing a streamed body to the caller's sink failed.
    #[error("Failed to write response to output sink: {0}")]
    Io(#[from] std::io::Error),
}

/// Unified error type surfaced by the verb dispatchers.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The engine was used before an execution context was bound.
    #[error("Execution context not set on the request client.")]
    ContextNotSet,

    /// A request descriptor failed validation.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// The transport attempt failed with a non-retryable error.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RequestError {
    /// Returns the HTTP status of the underlying response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(TransportError::Status(response)) => Some(response.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_not_set_message_is_fixed() {
        let error = RequestError::ContextNotSet;
        assert_eq!(
            error.to_string(),
            "Execution context not set on the request client."
        );
    }

    #[test]
    fn test_status_error_names_the_code() {
        let error = HttpResponseError {
            status: 403,
            headers: HashMap::new(),
            body: String::new(),
        };
        assert!(error.to_string().contains("403"));
    }

    #[test]
    fn test_transport_error_passes_status_through() {
        let error = RequestError::from(TransportError::Status(HttpResponseError {
            status: 404,
            headers: HashMap::new(),
            body: "Not Found".to_string(),
        }));
        assert_eq!(error.status(), Some(404));
        assert!(error.to_string().contains("404"));
    }

    #[test]
    fn test_io_error_is_not_a_status() {
        let error = RequestError::from(TransportError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "sink closed",
        )));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_invalid_request_error_names_the_url() {
        let error = InvalidRequestError::RelativeUrl {
            url: "lists/titles".to_string(),
        };
        assert!(error.to_string().contains("lists/titles"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let status_error: &dyn std::error::Error = &HttpResponseError {
            status: 400,
            headers: HashMap::new(),
            body: String::new(),
        };
        let _ = status_error;

        let request_error: &dyn std::error::Error = &RequestError::ContextNotSet;
        let _ = request_error;
    }
}
