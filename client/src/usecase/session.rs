//! Sign-in, sign-out, and current-session lookup.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::ports::{AuthGateway, IdTokenCredential, OAuthProvider, Session};
use crate::domain::{Error, UserId};

/// How the caller wants to sign in.
///
/// Provider authorization happens outside this crate; OAuth sign-in
/// receives the tokens that flow produced. Provider-specific failures are
/// not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInRequest {
    OAuth {
        provider: OAuthProvider,
        credential: IdTokenCredential,
    },
    Anonymous,
}

/// Establish a backend session.
#[derive(Debug)]
pub struct SignIn<A> {
    auth: Arc<A>,
}

impl<A> SignIn<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self { auth }
    }
}

impl<A: AuthGateway> SignIn<A> {
    /// Sign in and return the established session.
    #[instrument(skip(self, request))]
    pub async fn execute(&self, request: SignInRequest) -> Result<Session, Error> {
        let session = match request {
            SignInRequest::OAuth {
                provider,
                credential,
            } => self.auth.sign_in_with_id_token(provider, &credential).await,
            SignInRequest::Anonymous => self.auth.sign_in_anonymously().await,
        };
        session.map_err(Error::from)
    }
}

/// End the current backend session.
#[derive(Debug)]
pub struct SignOut<A> {
    auth: Arc<A>,
}

impl<A> SignOut<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self { auth }
    }
}

impl<A: AuthGateway> SignOut<A> {
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<(), Error> {
        self.auth.sign_out().await.map_err(Error::from)
    }
}

/// Read the signed-in user's id, when a session exists.
#[derive(Debug)]
pub struct CurrentUserId<A> {
    auth: Arc<A>,
}

impl<A> CurrentUserId<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self { auth }
    }
}

impl<A: AuthGateway> CurrentUserId<A> {
    pub fn execute(&self) -> Option<UserId> {
        self.auth.current_user_id()
    }
}
