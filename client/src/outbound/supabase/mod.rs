//! Supabase-backed adapters for the driven ports.
//!
//! [`SupabaseConnection`] owns transport details shared by every adapter:
//! the HTTP client, endpoint construction for the PostgREST / Storage /
//! GoTrue surfaces, auth headers, and HTTP error mapping. Each adapter
//! translates one port call into one backend request (the post RPC with
//! its follow-up fetch being the documented exception).

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use url::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::ports::{RepositoryError, Session, StorageBucket};
use crate::domain::UserId;

mod auth;
mod dto;
mod id_generator;
mod post_media_repository;
mod post_repository;
mod storage;
mod user_detail_query;
mod user_profile_repository;
mod user_repository;

pub use self::auth::SupabaseAuthGateway;
pub use self::id_generator::UuidGenerator;
pub use self::post_media_repository::SupabasePostMediaRepository;
pub use self::post_repository::SupabasePostRepository;
pub use self::storage::SupabaseObjectStorage;
pub use self::user_detail_query::SupabaseUserDetailQuery;
pub use self::user_profile_repository::SupabaseUserProfileRepository;
pub use self::user_repository::SupabaseUserRepository;

/// Shared Supabase transport: one HTTP client, one project URL, one
/// session slot. Cloned into every adapter behind an [`Arc`].
#[derive(Debug)]
pub struct SupabaseConnection {
    http: Client,
    base_url: Url,
    anon_key: String,
    session: RwLock<Option<Session>>,
}

impl SupabaseConnection {
    /// Build a connection with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, anon_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            anon_key,
            session: RwLock::new(None),
        })
    }

    /// Replace the active session. `None` drops back to anonymous-key auth.
    pub(crate) fn set_session(&self, session: Option<Session>) {
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// User id of the active session, when one exists.
    pub(crate) fn session_user_id(&self) -> Option<UserId> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.user_id)
    }

    fn bearer_token(&self) -> String {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or_else(|| self.anon_key.clone(), |s| s.access_token.clone())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // The project URL has no path; a panicking path_segments_mut would
        // mean a cannot-be-a-base URL, which Url parsing already rejects
        // for http(s) schemes.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn table_url(&self, table: &str) -> Url {
        self.endpoint(&["rest", "v1", table])
    }

    pub(crate) fn rpc_url(&self, function: &str) -> Url {
        self.endpoint(&["rest", "v1", "rpc", function])
    }

    pub(crate) fn storage_object_url(&self, bucket: StorageBucket, object_path: &str) -> Url {
        let mut segments = vec!["storage", "v1", "object", bucket.as_str()];
        segments.extend(object_path.split('/'));
        self.endpoint(&segments)
    }

    pub(crate) fn storage_public_url(&self, bucket: StorageBucket, object_path: &str) -> Url {
        let mut segments = vec!["storage", "v1", "object", "public", bucket.as_str()];
        segments.extend(object_path.split('/'));
        self.endpoint(&segments)
    }

    pub(crate) fn auth_url(&self, path: &str) -> Url {
        self.endpoint(&["auth", "v1", path])
    }

    /// Request with the project api key and the active bearer token applied.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(self.bearer_token())
    }

    /// GET rows matching PostgREST filter pairs.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, RepositoryError> {
        let response = self
            .request(Method::GET, self.table_url(table))
            .query(filters)
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = expect_success(response).await?;
        decode_rows(&body)
    }

    /// GET at most one row; appends `limit=1` to the filters.
    pub(crate) async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Option<T>, RepositoryError> {
        let mut filters = filters.to_vec();
        filters.push(("limit", "1".to_owned()));
        Ok(self.select(table, &filters).await?.into_iter().next())
    }

    /// POST one row and return the stored representation.
    pub(crate) async fn insert<T: DeserializeOwned>(
        &self,
        table: &str,
        body: &impl Serialize,
    ) -> Result<T, RepositoryError> {
        let response = self
            .request(Method::POST, self.table_url(table))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = expect_success(response).await?;
        decode_rows::<T>(&bytes)?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::decode("insert returned no representation"))
    }

    /// PATCH rows matching the filters and return the first stored
    /// representation, `None` when nothing matched.
    pub(crate) async fn update<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &impl Serialize,
    ) -> Result<Option<T>, RepositoryError> {
        let response = self
            .request(Method::PATCH, self.table_url(table))
            .query(filters)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = expect_success(response).await?;
        Ok(decode_rows::<T>(&bytes)?.into_iter().next())
    }

    /// PATCH rows matching the filters, discarding the response body.
    pub(crate) async fn update_void(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &impl Serialize,
    ) -> Result<(), RepositoryError> {
        let response = self
            .request(Method::PATCH, self.table_url(table))
            .query(filters)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await.map(drop)
    }

    /// DELETE rows matching the filters.
    pub(crate) async fn delete_where(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<(), RepositoryError> {
        let response = self
            .request(Method::DELETE, self.table_url(table))
            .query(filters)
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await.map(drop)
    }

    /// Invoke a database function and decode its scalar/JSON result.
    pub(crate) async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        body: &impl Serialize,
    ) -> Result<T, RepositoryError> {
        let response = self
            .request(Method::POST, self.rpc_url(function))
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let bytes = expect_success(response).await?;
        serde_json::from_slice(&bytes).map_err(|error| {
            RepositoryError::decode(format!("invalid rpc response payload: {error}"))
        })
    }
}

fn decode_rows<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, RepositoryError> {
    serde_json::from_slice(body)
        .map_err(|error| RepositoryError::decode(format!("invalid row payload: {error}")))
}

/// Collect the body and map non-2xx statuses into backend errors.
pub(crate) async fn expect_success(response: Response) -> Result<Vec<u8>, RepositoryError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> RepositoryError {
    RepositoryError::transport(error.to_string())
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> RepositoryError {
    RepositoryError::backend(status_message(status, body))
}

pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
pub(crate) fn test_connection() -> std::sync::Arc<SupabaseConnection> {
    let base_url = Url::parse("https://project.supabase.example").unwrap();
    let connection =
        SupabaseConnection::new(base_url, "anon-key".to_owned(), Duration::from_secs(5))
            .expect("client builds");
    std::sync::Arc::new(connection)
}
