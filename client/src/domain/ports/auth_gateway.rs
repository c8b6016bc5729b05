//! Port abstraction over the backend's auth service.
//!
//! Provider authorization flows happen outside this crate; the gateway
//! accepts already-obtained id tokens and tracks the resulting session.

use std::fmt;

use async_trait::async_trait;

use crate::domain::UserId;

/// OAuth providers the backend accepts id tokens from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OAuthProvider {
    Google,
    Apple,
    X,
    Discord,
}

impl OAuthProvider {
    /// Provider name on the wire. X is registered as `twitter` backend-side.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
            Self::X => "twitter",
            Self::Discord => "discord",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Tokens obtained from a provider's authorization flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenCredential {
    pub id_token: String,
    /// Some providers require the provider access token alongside the id
    /// token for verification.
    pub access_token: Option<String>,
}

/// An authenticated backend session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub access_token: String,
}

/// Failures raised by auth adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request never produced a backend response.
    #[error("auth request failed: {message}")]
    Transport { message: String },
    /// The backend rejected the sign-in or sign-out.
    #[error("auth operation failed: {message}")]
    Backend { message: String },
    /// The backend response could not be decoded.
    #[error("auth response could not be decoded: {message}")]
    Decode { message: String },
    /// No session is established.
    #[error("no active session")]
    NoSession,
}

impl AuthError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Driven port for sign-in, sign-out, and session inspection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange a provider id token for a backend session.
    async fn sign_in_with_id_token(
        &self,
        provider: OAuthProvider,
        credential: &IdTokenCredential,
    ) -> Result<Session, AuthError>;

    /// Create an anonymous session.
    async fn sign_in_anonymously(&self) -> Result<Session, AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Id of the signed-in user, when a session exists.
    fn current_user_id(&self) -> Option<UserId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_maps_to_the_twitter_wire_name() {
        assert_eq!(OAuthProvider::X.wire_name(), "twitter");
        assert_eq!(OAuthProvider::Google.to_string(), "google");
    }
}
