//! Supabase Storage bucket adapter.

use std::io::ErrorKind;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Method;
use tracing::debug;

use crate::domain::ports::{ObjectStorage, StorageBucket, StorageError, UploadPayload};

use super::{status_message, SupabaseConnection};

/// Content type for a stored filename, by extension (case-insensitive).
/// Unknown extensions fall back to the generic octet-stream type.
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Resolve an upload payload into raw bytes without touching the network.
async fn payload_bytes(payload: UploadPayload) -> Result<Vec<u8>, StorageError> {
    match payload {
        UploadPayload::File(path) => match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(StorageError::missing_file(path.display().to_string()))
            }
            Err(error) => Err(StorageError::payload(format!(
                "could not read {}: {error}",
                path.display()
            ))),
        },
        UploadPayload::Base64(encoded) => STANDARD
            .decode(encoded.as_bytes())
            .map_err(|error| StorageError::payload(format!("invalid base64 payload: {error}"))),
        UploadPayload::Bytes(bytes) => Ok(bytes),
    }
}

fn map_transport_error(error: reqwest::Error) -> StorageError {
    StorageError::transport(error.to_string())
}

#[derive(Debug)]
pub struct SupabaseObjectStorage {
    connection: Arc<SupabaseConnection>,
}

impl SupabaseObjectStorage {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseObjectStorage {
    async fn upload(
        &self,
        bucket: StorageBucket,
        folder: &str,
        filename: &str,
        payload: UploadPayload,
    ) -> Result<String, StorageError> {
        let bytes = payload_bytes(payload).await?;
        let object_path = format!("{folder}/{filename}");
        let response = self
            .connection
            .request(
                Method::POST,
                self.connection.storage_object_url(bucket, &object_path),
            )
            .header(reqwest::header::CONTENT_TYPE, content_type_for(filename))
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(map_transport_error)?;
            return Err(StorageError::backend(status_message(status, body.as_ref())));
        }

        Ok(self
            .connection
            .storage_public_url(bucket, &object_path)
            .to_string())
    }

    async fn delete(&self, bucket: StorageBucket, object_path: &str) -> Result<(), StorageError> {
        // Fire-and-forget: a failed delete leaves an orphan object behind,
        // which the caller cannot act on anyway.
        let request = self.connection.request(
            Method::DELETE,
            self.connection.storage_object_url(bucket, object_path),
        );
        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                debug!(%bucket, object_path, status = %response.status(), "storage delete rejected");
            }
            Ok(_) => {}
            Err(error) => {
                debug!(%bucket, object_path, %error, "storage delete failed");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo.PNG", "image/png")]
    #[case("photo.jpeg", "image/jpeg")]
    #[case("icon.svg", "image/svg+xml")]
    #[case("clip.MOV", "video/quicktime")]
    #[case("clip.webm", "video/webm")]
    #[case("archive.zip", "application/octet-stream")]
    #[case("no-extension", "application/octet-stream")]
    fn content_types_match_extensions(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(filename), expected);
    }

    #[tokio::test]
    async fn missing_files_fail_before_any_request() {
        let payload = UploadPayload::from_local_uri("file:///nonexistent/photo.png");
        let error = payload_bytes(payload).await.expect_err("read fails");
        assert_eq!(
            error,
            StorageError::missing_file("/nonexistent/photo.png")
        );
    }

    #[tokio::test]
    async fn base64_payloads_decode_to_their_bytes() {
        let payload = UploadPayload::Base64("aGVsbG8=".to_owned());
        assert_eq!(payload_bytes(payload).await.expect("decodes"), b"hello");
    }

    #[tokio::test]
    async fn malformed_base64_is_a_payload_error() {
        let payload = UploadPayload::Base64("not base64!".to_owned());
        let error = payload_bytes(payload).await.expect_err("decode fails");
        assert!(matches!(error, StorageError::Payload { .. }));
    }
}
