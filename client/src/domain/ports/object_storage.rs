//! Port abstraction over the backend's storage buckets.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

/// Storage buckets the client writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageBucket {
    /// Avatar images, under `{user_id}/avatars`.
    Users,
    /// Post media, under `{user_id}/post-medias`.
    Posts,
}

impl StorageBucket {
    /// Bucket name on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
        }
    }
}

impl fmt::Display for StorageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content handed to an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPayload {
    /// Read the content from a local file.
    File(PathBuf),
    /// Standard base64 of the content.
    Base64(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl UploadPayload {
    /// Build a file payload from a picker-style local URI, stripping a
    /// leading `file://` scheme when present.
    pub fn from_local_uri(uri: &str) -> Self {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        Self::File(PathBuf::from(path))
    }
}

/// Failures raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The request never produced a backend response.
    #[error("storage request failed: {message}")]
    Transport { message: String },
    /// The backend rejected the operation.
    #[error("storage operation failed: {message}")]
    Backend { message: String },
    /// The backend response could not be decoded.
    #[error("storage response could not be decoded: {message}")]
    Decode { message: String },
    /// A file payload pointed at a path that does not exist.
    #[error("file does not exist: {path}")]
    MissingFile { path: String },
    /// The payload itself could not be read or decoded.
    #[error("invalid upload payload: {message}")]
    Payload { message: String },
}

impl StorageError {
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

    pub fn missing_file(path: impl Into<String>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }
}

/// Driven port for bucket uploads and deletes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload content to `{folder}/{filename}` in the bucket, replacing
    /// any prior object at the same path, and return the public URL.
    async fn upload(
        &self,
        bucket: StorageBucket,
        folder: &str,
        filename: &str,
        payload: UploadPayload,
    ) -> Result<String, StorageError>;

    /// Remove the object at the given path. Fire-and-forget: adapters do
    /// not verify prior existence and swallow backend failures.
    async fn delete(&self, bucket: StorageBucket, object_path: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_uri_scheme_is_stripped() {
        let UploadPayload::File(path) = UploadPayload::from_local_uri("file:///tmp/photo.png")
        else {
            panic!("expected a file payload");
        };
        assert_eq!(path, PathBuf::from("/tmp/photo.png"));
    }

    #[test]
    fn plain_paths_pass_through() {
        let UploadPayload::File(path) = UploadPayload::from_local_uri("/tmp/clip.mp4") else {
            panic!("expected a file payload");
        };
        assert_eq!(path, PathBuf::from("/tmp/clip.mp4"));
    }

    #[test]
    fn bucket_wire_names_are_fixed() {
        assert_eq!(StorageBucket::Users.as_str(), "users");
        assert_eq!(StorageBucket::Posts.to_string(), "posts");
    }
}
