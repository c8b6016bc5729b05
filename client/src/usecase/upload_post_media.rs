//! Standalone post-media upload, single and fanned-out.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tracing::instrument;

use crate::domain::ports::{IdGenerator, ObjectStorage, StorageBucket, UploadPayload};
use crate::domain::{Error, MediaKind, UserId};

use super::media_file_extension;

const POST_MEDIA_FOLDER: &str = "post-medias";

/// Input to [`UploadPostMedia::execute`]; `media_url` is a local file
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPostMediaInput {
    pub user_id: UserId,
    pub media_url: String,
    pub media_kind: MediaKind,
}

/// Result of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPostMediaOutput {
    pub uploaded_url: String,
    pub media_kind: MediaKind,
}

/// Upload a single media file to the caller's post-media folder.
///
/// [`execute_multiple`](Self::execute_multiple) fans out concurrently;
/// ordering is carried by the index correspondence between inputs and
/// outputs, so no sequencing is needed there.
#[derive(Debug)]
pub struct UploadPostMedia<S, G> {
    storage: Arc<S>,
    ids: Arc<G>,
}

impl<S, G> UploadPostMedia<S, G> {
    pub fn new(storage: Arc<S>, ids: Arc<G>) -> Self {
        Self { storage, ids }
    }
}

impl<S, G> UploadPostMedia<S, G>
where
    S: ObjectStorage,
    G: IdGenerator,
{
    /// Upload one file and return its public URL.
    #[instrument(skip(self, input), fields(user_id = %input.user_id, kind = input.media_kind.as_str()))]
    pub async fn execute(
        &self,
        input: UploadPostMediaInput,
    ) -> Result<UploadPostMediaOutput, Error> {
        let extension = media_file_extension(&input.media_url, input.media_kind);
        let filename = format!("{}.{extension}", self.ids.generate());
        let folder = format!("{}/{POST_MEDIA_FOLDER}", input.user_id);

        let uploaded_url = self
            .storage
            .upload(
                StorageBucket::Posts,
                &folder,
                &filename,
                UploadPayload::from_local_uri(&input.media_url),
            )
            .await
            .map_err(Error::from)?;

        Ok(UploadPostMediaOutput {
            uploaded_url,
            media_kind: input.media_kind,
        })
    }

    /// Upload every input concurrently; one failure rejects the whole
    /// batch. Outputs line up with inputs by index.
    pub async fn execute_multiple(
        &self,
        inputs: Vec<UploadPostMediaInput>,
    ) -> Result<Vec<UploadPostMediaOutput>, Error> {
        try_join_all(inputs.into_iter().map(|input| self.execute(input))).await
    }
}
