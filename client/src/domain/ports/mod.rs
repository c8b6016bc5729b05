//! Domain ports defining the edges of the client.
//!
//! Driven ports describe how the domain expects to reach the backend
//! (tables, views, RPCs, storage buckets, auth). Driving ports describe
//! what the user store expects from the usecase layer. Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants.

pub mod auth_gateway;
pub mod driving;
pub mod id_generator;
pub mod object_storage;
pub mod post_media_repository;
pub mod post_repository;
pub mod user_detail_query;
pub mod user_profile_repository;
pub mod user_repository;

pub use self::auth_gateway::{AuthError, AuthGateway, IdTokenCredential, OAuthProvider, Session};
pub use self::driving::{ProfileChanges, ProfileUpdater, ScreenNameUpdater, SuiteUserFinder};
pub use self::id_generator::IdGenerator;
pub use self::object_storage::{ObjectStorage, StorageBucket, StorageError, UploadPayload};
pub use self::post_media_repository::{NewStoredMedia, PostMediaPatch, PostMediaRepository};
pub use self::post_repository::{
    NewPost, NewPostMedia, PostPatch, PostRepository, DEFAULT_POST_PAGE_SIZE,
};
pub use self::user_detail_query::UserDetailQuery;
pub use self::user_profile_repository::{ProfilePatch, UserProfileRepository};
pub use self::user_repository::UserRepository;

#[cfg(test)]
pub use self::auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use self::driving::{MockProfileUpdater, MockScreenNameUpdater, MockSuiteUserFinder};
#[cfg(test)]
pub use self::id_generator::MockIdGenerator;
#[cfg(test)]
pub use self::object_storage::MockObjectStorage;
#[cfg(test)]
pub use self::post_media_repository::MockPostMediaRepository;
#[cfg(test)]
pub use self::post_repository::MockPostRepository;
#[cfg(test)]
pub use self::user_detail_query::MockUserDetailQuery;
#[cfg(test)]
pub use self::user_profile_repository::MockUserProfileRepository;
#[cfg(test)]
pub use self::user_repository::MockUserRepository;

use super::error::{Error, ErrorCode};

/// Failures raised by the table, view, and RPC adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The request never produced a backend response.
    #[error("backend request failed: {message}")]
    Transport { message: String },
    /// The backend answered with an operation failure.
    #[error("backend reported an error: {message}")]
    Backend { message: String },
    /// The backend response could not be decoded.
    #[error("backend response could not be decoded: {message}")]
    Decode { message: String },
}

impl RepositoryError {
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

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        let code = match value {
            RepositoryError::Decode { .. } => ErrorCode::Internal,
            _ => ErrorCode::Backend,
        };
        Self::new(code, value.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(value: StorageError) -> Self {
        let code = match value {
            StorageError::MissingFile { .. } | StorageError::Payload { .. } => {
                ErrorCode::InvalidInput
            }
            StorageError::Decode { .. } => ErrorCode::Internal,
            _ => ErrorCode::Backend,
        };
        Self::new(code, value.to_string())
    }
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        let code = match value {
            AuthError::NoSession => ErrorCode::Unauthorized,
            AuthError::Decode { .. } => ErrorCode::Internal,
            _ => ErrorCode::Backend,
        };
        Self::new(code, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_to_domain_codes() {
        let backend: Error = RepositoryError::backend("status 500").into();
        assert_eq!(backend.code(), ErrorCode::Backend);

        let decode: Error = RepositoryError::decode("bad json").into();
        assert_eq!(decode.code(), ErrorCode::Internal);
    }

    #[test]
    fn missing_session_maps_to_unauthorized() {
        let err: Error = AuthError::NoSession.into();
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
