//! The retry-aware execution core behind every CloudCLI command.

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::context::CommandContext;
use crate::client::errors::RequestError;
use crate::client::request::{HttpMethod, RequestDescriptor, ResponseMode};
use crate::client::response::{ResponseBody, ThrottleSignal};
use crate::client::transport::{HttpTransport, Transport, TransportRequest};
use crate::config::ClientConfig;

/// Crate version stamped into the user agent.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The request engine shared by every command.
///
/// The client exposes one entry point per HTTP verb; all of them funnel into
/// a single execution core that:
///
/// - fails fast with a configuration error when no execution context has
///   been bound, before any network I/O;
/// - stamps a fixed `user-agent` and `accept-encoding: gzip` onto every
///   attempt, preserving all other caller-supplied headers;
/// - invokes the [`Transport`] exchange primitive, buffering the body or
///   streaming it verbatim to the descriptor's sink;
/// - absorbs 429/503 responses by re-issuing the original descriptor after
///   the server-advised `retry-after` interval (10 seconds when absent or
///   unparseable), and propagates every other failure unchanged.
///
/// Throttled requests retry indefinitely: there is no retry cap and no
/// deadline, so a server that keeps answering 429 keeps the request waiting.
/// Callers see only the final outcome, never the throttled attempts.
///
/// # Thread Safety
///
/// `RequestClient` is `Send + Sync`; independent requests run as independent
/// tasks with no ordering between them.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use cloudcli_core::client::{RequestClient, RequestDescriptor};
/// use cloudcli_core::ClientConfig;
///
/// let mut client = RequestClient::new(&ClientConfig::default());
/// client.bind_context(Arc::new(command_output));
///
/// let request = RequestDescriptor::builder("https://graph.contoso.com/v1.0/me")
///     .header("authorization", "Bearer token")
///     .build()?;
///
/// let body = client.get(request).await?;
/// ```
pub struct RequestClient {
    transport: Arc<dyn Transport>,
    context: Option<Arc<dyn CommandContext>>,
    user_agent: String,
}

// Verify RequestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestClient>();
};

impl RequestClient {
    /// Creates a new client over the production HTTP transport.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Creates a new client over the given transport.
    ///
    /// Tests use this to substitute a scripted transport and exercise the
    /// retry policy without network I/O.
    #[must_use]
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{prefix}CloudCLI v{CLIENT_VERSION} | Rust {rust_version}");

        Self {
            transport,
            context: None,
            user_agent,
        }
    }

    /// Binds the execution context for this CLI invocation.
    ///
    /// Must be called before the first request; every request issued without
    /// a bound context rejects with [`RequestError::ContextNotSet`] and never
    /// reaches the transport. The context is only read afterwards, never
    /// cleared.
    pub fn bind_context(&mut self, context: Arc<dyn CommandContext>) {
        self.context = Some(context);
    }

    /// Returns the user agent stamped onto every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// See [`RequestError`]; throttled responses are retried, not surfaced.
    pub async fn get(&self, request: RequestDescriptor) -> Result<ResponseBody, RequestError> {
        self.execute(HttpMethod::Get, request).await
    }

    /// Issues a POST request.
    ///
    /// # Errors
    ///
    /// See [`RequestError`].
    pub async fn post(&self, request: RequestDescriptor) -> Result<ResponseBody, RequestError> {
        self.execute(HttpMethod::Post, request).await
    }

    /// Issues a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`RequestError`].
    pub async fn patch(&self, request: RequestDescriptor) -> Result<ResponseBody, RequestError> {
        self.execute(HttpMethod::Patch, request).await
    }

    /// Issues a PUT request.
    ///
    /// # Errors
    ///
    /// See [`RequestError`].
    pub async fn put(&self, request: RequestDescriptor) -> Result<ResponseBody, RequestError> {
        self.execute(HttpMethod::Put, request).await
    }

    /// Issues a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`RequestError`].
    pub async fn delete(&self, request: RequestDescriptor) -> Result<ResponseBody, RequestError> {
        self.execute(HttpMethod::Delete, request).await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        mut request: RequestDescriptor,
    ) -> Result<ResponseBody, RequestError> {
        // Checked once per externally-initiated call; retries reuse the
        // already-validated path.
        let context = self.context.clone().ok_or(RequestError::ContextNotSet)?;

        loop {
            // Headers are recomputed from the original descriptor on every
            // attempt, including retries.
            let attempt = self.augmented_request(method, &request);

            tracing::debug!(method = %attempt.method, url = %attempt.url, "sending request");
            if context.debug_enabled() {
                context.log(&format!(
                    "Executing web request: {} {}",
                    attempt.method, attempt.url
                ));
            }

            let result = match request.mode {
                ResponseMode::Buffered => self.transport.perform(&attempt, None).await,
                ResponseMode::StreamToSink(ref mut sink) => {
                    self.transport.perform(&attempt, Some(sink.as_mut())).await
                }
            };

            let failure = match result {
                Ok(body) => return Ok(body),
                Err(failure) => failure,
            };

            let Some(signal) = ThrottleSignal::from_failure(&failure) else {
                return Err(failure.into());
            };

            let delay = signal.delay();
            tracing::debug!(
                status = signal.status,
                delay_secs = delay.as_secs(),
                "request throttled, waiting before retry"
            );
            if context.debug_enabled() {
                context.log(&format!(
                    "Request throttled ({}). Retrying in {}s...",
                    signal.status,
                    delay.as_secs()
                ));
            }

            tokio::time::sleep(delay).await;
        }
    }

    /// Derives the augmented copy of `request` handed to the transport.
    ///
    /// The caller's descriptor is left untouched. Engine headers win for
    /// `user-agent` and `accept-encoding`; caller values win everywhere else,
    /// with `content-type` defaulted from the body tag when absent.
    fn augmented_request(
        &self,
        method: HttpMethod,
        request: &RequestDescriptor,
    ) -> TransportRequest {
        let mut headers: HashMap<String, String> = request
            .headers
            .iter()
            .map(|(name, value)| (name.to_lowercase(), value.clone()))
            .collect();

        if let Some(body) = &request.body {
            headers
                .entry("content-type".to_string())
                .or_insert_with(|| body.default_content_type().to_string());
        }

        headers.insert("user-agent".to_string(), self.user_agent.clone());
        headers.insert("accept-encoding".to_string(), "gzip".to_string());

        TransportRequest {
            method,
            url: request.url.clone(),
            headers,
            body: request.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::errors::TransportError;
    use crate::client::request::OutputSink;
    use async_trait::async_trait;
    use serde_json::json;

    struct NoopTransport;

    #[async_trait]
    impl Transport for NoopTransport {
        async fn perform(
            &self,
            _request: &TransportRequest,
            _sink: Option<&mut OutputSink>,
        ) -> Result<ResponseBody, TransportError> {
            Ok(ResponseBody::Json(json!({})))
        }
    }

    fn test_client(config: &ClientConfig) -> RequestClient {
        RequestClient::with_transport(config, Arc::new(NoopTransport))
    }

    #[test]
    fn test_user_agent_identifies_the_client() {
        let client = test_client(&ClientConfig::default());
        assert!(client.user_agent().contains("CloudCLI"));
        assert!(client.user_agent().contains(CLIENT_VERSION));
        assert!(client.user_agent().contains("Rust"));
    }

    #[test]
    fn test_user_agent_prefix_is_prepended() {
        let config = ClientConfig::builder()
            .user_agent_prefix("ContosoAutomation/2.1")
            .build();
        let client = test_client(&config);
        assert!(client.user_agent().starts_with("ContosoAutomation/2.1 | "));
    }

    #[test]
    fn test_augmentation_sets_engine_headers() {
        let client = test_client(&ClientConfig::default());
        let request = RequestDescriptor::builder("https://contoso.sharepoint.com/")
            .build()
            .unwrap();

        let attempt = client.augmented_request(HttpMethod::Get, &request);
        assert_eq!(
            attempt.headers.get("user-agent"),
            Some(&client.user_agent().to_string())
        );
        assert_eq!(
            attempt.headers.get("accept-encoding"),
            Some(&"gzip".to_string())
        );
    }

    #[test]
    fn test_augmentation_preserves_caller_headers() {
        let client = test_client(&ClientConfig::default());
        let request = RequestDescriptor::builder("https://contoso.sharepoint.com/")
            .header("authorization", "Bearer token")
            .header("X-RequestDigest", "digest")
            .build()
            .unwrap();

        let attempt = client.augmented_request(HttpMethod::Post, &request);
        assert_eq!(
            attempt.headers.get("authorization"),
            Some(&"Bearer token".to_string())
        );
        assert_eq!(
            attempt.headers.get("x-requestdigest"),
            Some(&"digest".to_string())
        );
    }

    #[test]
    fn test_augmentation_overrides_caller_user_agent() {
        let client = test_client(&ClientConfig::default());
        let request = RequestDescriptor::builder("https://contoso.sharepoint.com/")
            .header("User-Agent", "curl/8.0")
            .header("Accept-Encoding", "identity")
            .build()
            .unwrap();

        let attempt = client.augmented_request(HttpMethod::Get, &request);
        assert!(attempt.headers.get("user-agent").unwrap().contains("CloudCLI"));
        assert_eq!(
            attempt.headers.get("accept-encoding"),
            Some(&"gzip".to_string())
        );
    }

    #[test]
    fn test_content_type_defaults_from_body() {
        let client = test_client(&ClientConfig::default());
        let request = RequestDescriptor::builder("https://contoso.sharepoint.com/")
            .json_body(json!({"Title": "Demo"}))
            .build()
            .unwrap();

        let attempt = client.augmented_request(HttpMethod::Post, &request);
        assert_eq!(
            attempt.headers.get("content-type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_content_type_respects_caller_value() {
        let client = test_client(&ClientConfig::default());
        let request = RequestDescriptor::builder("https://contoso.sharepoint.com/")
            .header("content-type", "application/xml")
            .text_body("<Batch/>")
            .build()
            .unwrap();

        let attempt = client.augmented_request(HttpMethod::Post, &request);
        assert_eq!(
            attempt.headers.get("content-type"),
            Some(&"application/xml".to_string())
        );
    }
}
