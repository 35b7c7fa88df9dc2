//! Error types for validated configuration values.
//!
//! All newtype constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and
//! actionable.
//!
//! # Example
//!
//! ```rust
//! use cloudcli_core::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while constructing configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Provide the bearer token issued for the target service.")]
    EmptyAccessToken,

    /// Resource identifier is invalid.
    #[error("Invalid resource '{resource}'. Expected an absolute URI such as 'https://graph.contoso.com'.")]
    InvalidResource {
        /// The invalid resource that was provided.
        resource: String,
    },
}
