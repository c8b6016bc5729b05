//! Port abstraction over the `t_posts` table and the `create_post` RPC.

use async_trait::async_trait;

use crate::domain::post::{MediaKind, Post};
use crate::domain::{PostId, UserId};

use super::RepositoryError;

/// Default page size for post listings.
pub const DEFAULT_POST_PAGE_SIZE: u32 = 20;

/// One media item attached to a post at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPostMedia {
    pub kind: MediaKind,
    pub url: String,
    pub display_order: u32,
}

/// Input to post creation.
///
/// ## Invariants
/// - `medias[i].display_order` values are unique and contiguous from 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
    pub text: String,
    pub referenced_post_id: Option<PostId>,
    pub medias: Vec<NewPostMedia>,
}

/// Selective update of a post row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostPatch {
    pub text: Option<String>,
}

/// Driven port for post rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a post through the backend RPC and return the stored post,
    /// medias joined and sorted by display order.
    async fn create(&self, input: &NewPost) -> Result<Post, RepositoryError>;

    /// Fetch a post with its media by primary key.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;

    /// List a user's posts, newest first.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Post>, RepositoryError>;

    /// Update a post and return the stored row.
    async fn update(&self, id: &PostId, patch: &PostPatch) -> Result<Post, RepositoryError>;

    /// Delete a post row. Media rows are removed separately through
    /// [`PostMediaRepository::delete_by_post_id`].
    ///
    /// [`PostMediaRepository::delete_by_post_id`]: super::PostMediaRepository::delete_by_post_id
    async fn delete(&self, id: &PostId) -> Result<(), RepositoryError>;

    /// List timeline posts for a user (own posts plus followed users),
    /// newest first.
    async fn find_for_timeline(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Post>, RepositoryError>;
}
