//! GoTrue auth adapter.
//!
//! Successful sign-ins store the session on the shared connection so every
//! subsequent request carries the user's bearer token instead of the
//! anonymous key.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AuthError, AuthGateway, IdTokenCredential, OAuthProvider, Session};
use crate::domain::UserId;

use super::{status_message, SupabaseConnection};

#[derive(Debug, Serialize)]
struct IdTokenGrant<'a> {
    provider: &'a str,
    id_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: UserId,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        Session {
            user_id: self.user.id,
            access_token: self.access_token,
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> AuthError {
    AuthError::transport(error.to_string())
}

#[derive(Debug)]
pub struct SupabaseAuthGateway {
    connection: Arc<SupabaseConnection>,
}

impl SupabaseAuthGateway {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }

    async fn establish_session(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Session, AuthError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(AuthError::backend(status_message(status, body.as_ref())));
        }

        let decoded: TokenResponse = serde_json::from_slice(body.as_ref()).map_err(|error| {
            AuthError::decode(format!("invalid token response payload: {error}"))
        })?;
        let session = decoded.into_session();
        self.connection.set_session(Some(session.clone()));
        Ok(session)
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuthGateway {
    async fn sign_in_with_id_token(
        &self,
        provider: OAuthProvider,
        credential: &IdTokenCredential,
    ) -> Result<Session, AuthError> {
        let request = self
            .connection
            .request(Method::POST, self.connection.auth_url("token"))
            .query(&[("grant_type", "id_token")])
            .json(&IdTokenGrant {
                provider: provider.wire_name(),
                id_token: &credential.id_token,
                access_token: credential.access_token.as_deref(),
            });
        self.establish_session(request).await
    }

    async fn sign_in_anonymously(&self) -> Result<Session, AuthError> {
        let request = self
            .connection
            .request(Method::POST, self.connection.auth_url("signup"))
            .json(&serde_json::json!({}));
        self.establish_session(request).await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let response = self
            .connection
            .request(Method::POST, self.connection.auth_url("logout"))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(map_transport_error)?;
            return Err(AuthError::backend(status_message(status, body.as_ref())));
        }
        self.connection.set_session(None);
        Ok(())
    }

    fn current_user_id(&self) -> Option<UserId> {
        self.connection.session_user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_omit_an_absent_provider_access_token() {
        let body = serde_json::to_value(IdTokenGrant {
            provider: OAuthProvider::X.wire_name(),
            id_token: "idt",
            access_token: None,
        })
        .expect("serialises");
        assert_eq!(body["provider"], "twitter");
        assert_eq!(body["id_token"], "idt");
        assert!(body.get("access_token").is_none());
    }

    #[test]
    fn token_responses_decode_into_sessions() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "user": { "id": "5f5f0b5a-9b2a-4d4e-8c44-2d9f3a6f0001", "aud": "authenticated" }
        }"#;
        let decoded: TokenResponse = serde_json::from_str(body).expect("decodes");
        let session = decoded.into_session();
        assert_eq!(session.access_token, "jwt");
        assert_eq!(
            session.user_id.to_string(),
            "5f5f0b5a-9b2a-4d4e-8c44-2d9f3a6f0001"
        );
    }
}
