//! Post creation with sequential media uploads.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::ports::{
    IdGenerator, NewPost, NewPostMedia, ObjectStorage, PostRepository, StorageBucket,
    UploadPayload,
};
use crate::domain::post::MAX_MEDIA_COUNT;
use crate::domain::{Error, MediaKind, Post, PostId, PostText, UserId};

use super::media_file_extension;

const POST_MEDIA_FOLDER: &str = "post-medias";

/// Input to [`CreatePost::execute`].
///
/// `image_urls` and `video_urls` are local file references from the
/// caller's media picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostInput {
    pub user_id: UserId,
    pub text: PostText,
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub referenced_post_id: Option<PostId>,
}

/// Upload each media item, then create the post through the backend RPC.
///
/// Uploads run sequentially so `display_order` assignment stays
/// deterministic: images take the leading indices, videos follow,
/// 0-based across the combined sequence.
#[derive(Debug)]
pub struct CreatePost<S, G, P> {
    storage: Arc<S>,
    ids: Arc<G>,
    posts: Arc<P>,
}

impl<S, G, P> CreatePost<S, G, P> {
    pub fn new(storage: Arc<S>, ids: Arc<G>, posts: Arc<P>) -> Self {
        Self { storage, ids, posts }
    }
}

impl<S, G, P> CreatePost<S, G, P>
where
    S: ObjectStorage,
    G: IdGenerator,
    P: PostRepository,
{
    /// Upload media and create the post, returning the stored post with
    /// its media joined and sorted by display order.
    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn execute(&self, input: CreatePostInput) -> Result<Post, Error> {
        let media_count = input.image_urls.len() + input.video_urls.len();
        if media_count > MAX_MEDIA_COUNT {
            return Err(Error::invalid_input(format!(
                "a post may attach at most {MAX_MEDIA_COUNT} media items, got {media_count}"
            )));
        }
        let mut medias = Vec::with_capacity(media_count);

        for (index, source_url) in input.image_urls.iter().enumerate() {
            let url = self
                .upload_media(&input.user_id, source_url, MediaKind::Image)
                .await?;
            medias.push(NewPostMedia {
                kind: MediaKind::Image,
                url,
                display_order: index as u32,
            });
        }

        let image_count = input.image_urls.len();
        for (index, source_url) in input.video_urls.iter().enumerate() {
            let url = self
                .upload_media(&input.user_id, source_url, MediaKind::Video)
                .await?;
            medias.push(NewPostMedia {
                kind: MediaKind::Video,
                url,
                display_order: (image_count + index) as u32,
            });
        }

        self.posts
            .create(&NewPost {
                user_id: input.user_id,
                text: input.text.into(),
                referenced_post_id: input.referenced_post_id,
                medias,
            })
            .await
            .map_err(Error::from)
    }

    async fn upload_media(
        &self,
        user_id: &UserId,
        source_url: &str,
        kind: MediaKind,
    ) -> Result<String, Error> {
        let extension = media_file_extension(source_url, kind);
        let filename = format!("{}.{extension}", self.ids.generate());
        let folder = format!("{user_id}/{POST_MEDIA_FOLDER}");
        self.storage
            .upload(
                StorageBucket::Posts,
                &folder,
                &filename,
                UploadPayload::from_local_uri(source_url),
            )
            .await
            .map_err(Error::from)
    }
}
