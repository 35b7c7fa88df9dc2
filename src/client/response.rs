//! Response body and throttle-signal types.

use std::time::Duration;

use crate::client::errors::TransportError;

/// Delay applied when a throttled response carries no usable `retry-after`.
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(10);

/// A successfully delivered response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// A body that parsed as JSON.
    Json(serde_json::Value),
    /// A body returned as plain text.
    Text(String),
    /// The body was written to the caller's sink.
    Streamed,
}

impl ResponseBody {
    /// Parses buffered body text, preferring JSON.
    #[must_use]
    pub fn from_text(text: String) -> Self {
        serde_json::from_str(&text).map_or(Self::Text(text), Self::Json)
    }

    /// Returns the JSON payload, if this body parsed as JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text payload, if this body was returned as plain text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A server throttling signal derived from a failed attempt.
///
/// Only HTTP 429 (rate limited) and 503 (service unavailable) qualify; both
/// are expected to succeed when retried after a delay. The signal is computed
/// per attempt and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleSignal {
    /// The throttling status code (429 or 503).
    pub status: u16,
    /// Server-advised wait, when the `retry-after` header parsed cleanly.
    pub advised: Option<Duration>,
}

impl ThrottleSignal {
    /// Derives a throttle signal from a transport failure.
    ///
    /// Returns `None` for anything that must propagate to the caller: network
    /// errors, sink I/O errors, and every HTTP status other than 429/503.
    #[must_use]
    pub fn from_failure(failure: &TransportError) -> Option<Self> {
        let TransportError::Status(response) = failure else {
            return None;
        };
        if response.status != 429 && response.status != 503 {
            return None;
        }

        // retry-after is advisory whole seconds; anything that does not
        // parse as a non-negative integer falls back to the default wait.
        let advised = response
            .headers
            .get("retry-after")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        Some(Self {
            status: response.status,
            advised,
        })
    }

    /// Returns the wait to apply before the next attempt.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.advised.unwrap_or(DEFAULT_RETRY_WAIT)
    }
}
