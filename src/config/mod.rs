//! Configuration types for the CloudCLI request core.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: settings shared by every request the engine issues
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`Resource`]: a validated resource identifier newtype
//! - [`AccessToken`]: a validated access token newtype with masked debug output
//!
//! # Example
//!
//! ```rust
//! use cloudcli_core::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .user_agent_prefix("ContosoAutomation/2.1")
//!     .build();
//!
//! assert_eq!(config.user_agent_prefix(), Some("ContosoAutomation/2.1"));
//! ```

mod newtypes;

pub use newtypes::{AccessToken, Resource};

/// Configuration for the request engine.
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the user agent prefix, if configured.
    ///
    /// The prefix is prepended to the fixed user agent the engine stamps on
    /// every request, letting embedding tools identify themselves upstream.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

/// Builder for [`ClientConfig`] instances.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Sets the user agent prefix.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};
