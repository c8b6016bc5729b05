//! Port abstraction over the `t_post_medias` table.

use async_trait::async_trait;

use crate::domain::post::{MediaKind, PostMedia};
use crate::domain::{PostId, PostMediaId};

use super::RepositoryError;

/// Input to creating a media row for an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStoredMedia {
    pub post_id: PostId,
    pub kind: MediaKind,
    pub url: String,
    pub display_order: u32,
}

/// Selective update of a media row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostMediaPatch {
    pub url: Option<String>,
    pub display_order: Option<u32>,
}

/// Driven port for post media rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostMediaRepository: Send + Sync {
    /// Insert a media row and return the stored row.
    async fn create(&self, input: &NewStoredMedia) -> Result<PostMedia, RepositoryError>;

    /// Fetch a media row by primary key.
    async fn find_by_id(&self, id: &PostMediaId) -> Result<Option<PostMedia>, RepositoryError>;

    /// List a post's media ordered by display order.
    async fn find_by_post_id(&self, post_id: &PostId)
        -> Result<Vec<PostMedia>, RepositoryError>;

    /// Update a media row and return the stored row.
    async fn update(
        &self,
        id: &PostMediaId,
        patch: &PostMediaPatch,
    ) -> Result<PostMedia, RepositoryError>;

    /// Delete one media row.
    async fn delete(&self, id: &PostMediaId) -> Result<(), RepositoryError>;

    /// Delete every media row owned by a post; the cascade leg of post
    /// deletion.
    async fn delete_by_post_id(&self, post_id: &PostId) -> Result<(), RepositoryError>;
}
