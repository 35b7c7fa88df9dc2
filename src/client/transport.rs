//! The swappable HTTP exchange primitive.
//!
//! The engine funnels every attempt through the [`Transport`] trait: one
//! "perform HTTP exchange" operation taking an augmented request and an
//! optional output sink. Production code uses [`HttpTransport`] over
//! `reqwest`; tests substitute a recording implementation so the retry logic
//! can be exercised without network I/O.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::client::errors::{HttpResponseError, TransportError};
use crate::client::request::{HttpMethod, OutputSink, RequestBody};
use crate::client::response::ResponseBody;

/// The augmented copy of a request handed to the transport.
///
/// Derived fresh from the original descriptor for every attempt, after header
/// normalization; the caller's descriptor is never mutated.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    /// The HTTP method fixed by the verb dispatcher.
    pub method: HttpMethod,
    /// The absolute target URL.
    pub url: String,
    /// Fully normalized headers, keyed by lowercase name.
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
}

/// One HTTP exchange: request out, body back (or a structured failure).
///
/// Implementations resolve only for 2xx responses. Any other status must be
/// reported as [`TransportError::Status`] carrying the status code and a
/// lowercase header map, which is what the retry loop classifies. Failures
/// without an HTTP response map to [`TransportError::Network`].
///
/// Implementations are stateless from the engine's viewpoint; concurrent
/// calls must not interfere with each other.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one exchange.
    ///
    /// When `sink` is provided the response bytes are copied into it verbatim
    /// and the result is [`ResponseBody::Streamed`]; otherwise the buffered
    /// body is returned parsed.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] for non-2xx statuses, connection failures,
    /// and sink write failures.
    async fn perform(
        &self,
        request: &TransportRequest,
        sink: Option<&mut OutputSink>,
    ) -> Result<ResponseBody, TransportError>;
}

/// Production [`Transport`] backed by `reqwest`.
///
/// TLS uses rustls; gzip-encoded responses are decompressed transparently by
/// the client, so buffered and streamed consumers both observe decoded
/// payload bytes.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new transport with its own connection pool.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(
        &self,
        request: &TransportRequest,
        sink: Option<&mut OutputSink>,
    ) -> Result<ResponseBody, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            // reqwest negotiates content encoding itself; a manually set
            // accept-encoding would disable its transparent decompression.
            if name == "accept-encoding" {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        match &request.body {
            Some(RequestBody::Json(value)) => builder = builder.json(value),
            Some(RequestBody::Text(text)) => builder = builder.body(text.clone()),
            None => {}
        }

        let mut response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let headers = collect_headers(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status(HttpResponseError {
                status: status.as_u16(),
                headers,
                body,
            }));
        }

        match sink {
            Some(sink) => {
                while let Some(chunk) = response.chunk().await? {
                    sink.write_all(&chunk).await?;
                }
                sink.flush().await?;
                Ok(ResponseBody::Streamed)
            }
            None => {
                let text = response.text().await?;
                Ok(ResponseBody::from_text(text))
            }
        }
    }
}

const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_lowercase(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};
