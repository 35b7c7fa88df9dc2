//! Session state binding a resource to its access token.

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::config::{AccessToken, Resource};

/// An authenticated connection to a single cloud service.
///
/// A session pairs the resource a command targets with the bearer token the
/// authentication provider obtained for it. The session never refreshes or
/// validates the token; it only hands it out, failing when a command needs a
/// token that was never acquired.
///
/// Sessions are immutable after creation and serializable for storage
/// between CLI invocations.
///
/// # Example
///
/// ```rust
/// use cloudcli_core::{AccessToken, Resource, Session};
///
/// let session = Session::new(
///     Resource::new("https://graph.contoso.com").unwrap(),
///     Some(AccessToken::new("token-value").unwrap()),
/// );
///
/// let (name, value) = session.authorization_header().unwrap();
/// assert_eq!(name, "authorization");
/// assert_eq!(value, "Bearer token-value");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// The resource this session is for.
    pub resource: Resource,

    /// The access token obtained for the resource, if any.
    pub access_token: Option<AccessToken>,
}

impl Session {
    /// Creates a new session for the given resource.
    #[must_use]
    pub const fn new(resource: Resource, access_token: Option<AccessToken>) -> Self {
        Self {
            resource,
            access_token,
        }
    }

    /// Returns `true` if this session holds an access token.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.access_token.is_some()
    }

    /// Returns the bearer token for this session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenMissing`] if no token was acquired for the
    /// resource.
    pub fn bearer_token(&self) -> Result<&AccessToken, AuthError> {
        self.access_token.as_ref().ok_or_else(|| AuthError::TokenMissing {
            resource: self.resource.to_string(),
        })
    }

    /// Returns the `authorization` header pair for this session.
    ///
    /// The command layer merges the pair into a request descriptor's headers;
    /// the engine itself never reaches into the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenMissing`] if no token was acquired for the
    /// resource.
    pub fn authorization_header(&self) -> Result<(String, String), AuthError> {
        let token = self.bearer_token()?;
        Ok((
            "authorization".to_string(),
            format!("Bearer {}", token.expose()),
        ))
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn resource() -> Resource {
        Resource::new("https://graph.contoso.com").unwrap()
    }

    #[test]
    fn test_session_with_token_is_connected() {
        let session = Session::new(resource(), Some(AccessToken::new("abc").unwrap()));
        assert!(session.is_connected());
    }

    #[test]
    fn test_authorization_header_formats_bearer_value() {
        let session = Session::new(resource(), Some(AccessToken::new("abc").unwrap()));
        let (name, value) = session.authorization_header().unwrap();
        assert_eq!(name, "authorization");
        assert_eq!(value, "Bearer abc");
    }

    #[test]
    fn test_missing_token_is_reported_with_resource() {
        let session = Session::new(resource(), None);
        let err = session.authorization_header().unwrap_err();
        assert!(matches!(err, AuthError::TokenMissing { .. }));
        assert!(err.to_string().contains("https://graph.contoso.com"));
    }

    #[test]
    fn test_session_round_trips_through_serde() {
        let session = Session::new(resource(), Some(AccessToken::new("abc").unwrap()));
        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.resource, session.resource);
        assert!(restored.is_connected());
    }
}
