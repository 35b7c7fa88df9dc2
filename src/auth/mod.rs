//! Authentication state consumed by the command layer.
//!
//! The request engine treats authentication as an external concern: token
//! acquisition and refresh happen elsewhere, and commands merge the bearer
//! header into their request descriptors. This module provides the
//! [`Session`] type that carries that state and fails when a command needs a
//! token that is absent.

mod session;

pub use session::Session;

use thiserror::Error;

/// Errors raised when authentication state is required but unavailable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No access token has been acquired for the target resource.
    #[error("No access token available for resource '{resource}'. Log in before running this command.")]
    TokenMissing {
        /// The resource the command targets.
        resource: String,
    },
}
