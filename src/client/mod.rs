//! The shared request engine every CloudCLI command funnels through.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`RequestClient`]: verb dispatchers over the retry-aware execution core
//! - [`RequestDescriptor`]: one REST call, built by the command layer
//! - [`ResponseBody`]: a buffered (JSON/text) or streamed result
//! - [`Transport`]: the swappable "perform one HTTP exchange" primitive
//! - [`CommandContext`]: the opaque command handle requests are bound to
//! - [`RequestError`] / [`TransportError`]: the caller-visible error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cloudcli_core::client::{RequestClient, RequestDescriptor};
//! use cloudcli_core::ClientConfig;
//!
//! let mut client = RequestClient::new(&ClientConfig::default());
//! client.bind_context(Arc::new(command_output));
//!
//! let request = RequestDescriptor::builder("https://graph.contoso.com/v1.0/me")
//!     .header("authorization", "Bearer token")
//!     .build()?;
//!
//! let body = client.get(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The execution core retries automatically when the server signals
//! throttling:
//!
//! - **429 (Rate Limited)** and **503 (Service Unavailable)**: wait the
//!   `retry-after` interval (10 seconds when the header is absent or not a
//!   non-negative integer), then re-issue the original descriptor. There is
//!   no retry cap; the loop runs until a non-throttle outcome.
//! - **Everything else** (other statuses, network errors, sink failures):
//!   propagated to the caller immediately and unmodified.

mod context;
mod errors;
mod request;
mod request_client;
mod response;
mod transport;

pub use context::CommandContext;
pub use errors::{
    HttpResponseError, InvalidRequestError, RequestError, TransportError,
};
pub use request::{
    HttpMethod, OutputSink, RequestBody, RequestDescriptor, RequestDescriptorBuilder, ResponseMode,
};
pub use request_client::{RequestClient, CLIENT_VERSION};
pub use response::{ResponseBody, ThrottleSignal, DEFAULT_RETRY_WAIT};
pub use transport::{HttpTransport, Transport, TransportRequest};
