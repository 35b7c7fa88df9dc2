//! Request descriptor types for the CloudCLI request engine.
//!
//! This module provides the [`RequestDescriptor`] type and its builder for
//! describing a single REST call before it is handed to a verb dispatcher.

use std::collections::HashMap;
use std::fmt;

use tokio::io::AsyncWrite;

use crate::client::errors::InvalidRequestError;

/// A writable destination for streamed response bodies.
pub type OutputSink = dyn AsyncWrite + Send + Unpin;

/// HTTP methods exposed by the verb dispatchers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the wire-format name of this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a request body.
///
/// The tag doubles as the default `content-type` when the caller has not set
/// one explicitly.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON payload (`application/json`).
    Json(serde_json::Value),
    /// A raw text payload (`text/plain` unless the caller overrides it).
    Text(String),
}

impl RequestBody {
    /// Returns the default MIME type for this body.
    #[must_use]
    pub const fn default_content_type(&self) -> &'static str {
        match self {
            Self::Json(_) => "application/json",
            Self::Text(_) => "text/plain",
        }
    }
}

/// How the response body should be consumed.
///
/// `StreamToSink` carries the destination with it, so a streamed response can
/// never be accidentally buffered and re-encoded as text. Binary payloads
/// reach the sink as raw octets.
pub enum ResponseMode {
    /// Read the whole body and return it parsed.
    Buffered,
    /// Copy the body verbatim into the given sink.
    StreamToSink(Box<OutputSink>),
}

impl fmt::Debug for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffered => f.write_str("Buffered"),
            Self::StreamToSink(_) => f.write_str("StreamToSink(..)"),
        }
    }
}

/// A REST call to be issued through a verb dispatcher.
///
/// Descriptors are method-less on purpose: the dispatcher that receives one
/// fixes the HTTP method exactly once. A descriptor describes one logical
/// request; the engine re-submits the same descriptor across throttled
/// retries and derives a fresh augmented copy for each transport attempt.
///
/// # Example
///
/// ```rust
/// use cloudcli_core::client::RequestDescriptor;
/// use serde_json::json;
///
/// let request = RequestDescriptor::builder("https://graph.contoso.com/v1.0/me")
///     .header("authorization", "Bearer token")
///     .json_body(json!({"displayName": "Megan Bowen"}))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct RequestDescriptor {
    /// The absolute target URL.
    pub url: String,
    /// Caller-supplied headers, keyed case-insensitively (lowercased).
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// How the response body should be consumed.
    pub mode: ResponseMode,
}

impl RequestDescriptor {
    /// Creates a new builder for the given target URL.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::new(url)
    }
}

/// Builder for [`RequestDescriptor`] instances.
pub struct RequestDescriptorBuilder {
    url: String,
    headers: HashMap<String, String>,
    body: Option<RequestBody>,
    mode: ResponseMode,
}

impl RequestDescriptorBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: None,
            mode: ResponseMode::Buffered,
        }
    }

    /// Adds a single header.
    ///
    /// Header names are lowercased so later lookups are case-insensitive.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    /// Adds all headers from the given map.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self.headers.insert(name.to_lowercase(), value);
        }
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(RequestBody::Json(body.into()));
        self
    }

    /// Sets a raw text request body.
    #[must_use]
    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Streams the response body into the given sink instead of buffering it.
    #[must_use]
    pub fn stream_to(mut self, sink: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        self.mode = ResponseMode::StreamToSink(Box::new(sink));
        self
    }

    /// Builds the [`RequestDescriptor`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError::RelativeUrl`] if the URL is not an
    /// absolute `http`/`https` endpoint.
    pub fn build(self) -> Result<RequestDescriptor, InvalidRequestError> {
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(InvalidRequestError::RelativeUrl { url: self.url });
        }

        Ok(RequestDescriptor {
            url: self.url,
            headers: self.headers,
            body: self.body,
            mode: self.mode,
        })
    }
}
