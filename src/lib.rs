//! # CloudCLI request core
//!
//! The shared HTTP request engine behind the CloudCLI command-line client.
//! Command modules describe a REST call as a [`client::RequestDescriptor`],
//! hand it to one of the five verb dispatchers on [`client::RequestClient`],
//! and receive the response body — the engine takes care of header
//! injection, buffered vs. streamed consumption, and automatic retry of
//! rate-limited (429) and transiently-unavailable (503) responses.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cloudcli_core::client::{RequestClient, RequestDescriptor};
//! use cloudcli_core::{AccessToken, ClientConfig, Resource, Session};
//!
//! // Session state comes from the authentication provider.
//! let session = Session::new(
//!     Resource::new("https://graph.contoso.com")?,
//!     Some(AccessToken::new(token)?),
//! );
//!
//! let mut client = RequestClient::new(&ClientConfig::default());
//! client.bind_context(Arc::new(command_output));
//!
//! let (auth_name, auth_value) = session.authorization_header()?;
//! let request = RequestDescriptor::builder("https://graph.contoso.com/v1.0/me")
//!     .header(auth_name, auth_value)
//!     .build()?;
//!
//! let body = client.get(request).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the execution context is bound to the client
//!   instance, not to the process.
//! - **Fail-fast validation**: newtypes and descriptors validate on
//!   construction; an unbound client rejects before any network I/O.
//! - **Swappable transport**: the retry policy is tested against a scripted
//!   [`client::Transport`] with no sockets involved.
//! - **Async-first**: designed for use with the Tokio runtime; retry waits
//!   never block a thread.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, Session};
pub use config::{AccessToken, ClientConfig, ClientConfigBuilder, Resource};
pub use error::ConfigError;

// Re-export the request engine surface
pub use client::{
    CommandContext, HttpMethod, HttpResponseError, InvalidRequestError, RequestBody,
    RequestClient, RequestDescriptor, RequestError, ResponseBody, ResponseMode, Transport,
    TransportError,
};
