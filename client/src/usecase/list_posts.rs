//! Paged post listings over the repository port.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::ports::{PostRepository, DEFAULT_POST_PAGE_SIZE};
use crate::domain::{Error, Post, UserId};

/// Page through a user's posts or their timeline, newest first,
/// [`DEFAULT_POST_PAGE_SIZE`] rows per page.
#[derive(Debug)]
pub struct ListPosts<P> {
    posts: Arc<P>,
}

impl<P> ListPosts<P> {
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }
}

impl<P: PostRepository> ListPosts<P> {
    /// Posts authored by `user_id`; `page` is 0-based.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn by_user(&self, user_id: &UserId, page: u32) -> Result<Vec<Post>, Error> {
        self.posts
            .find_by_user_id(user_id, DEFAULT_POST_PAGE_SIZE, page * DEFAULT_POST_PAGE_SIZE)
            .await
            .map_err(Error::from)
    }

    /// Timeline for `user_id` (own posts plus followed users); `page` is
    /// 0-based.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn timeline(&self, user_id: &UserId, page: u32) -> Result<Vec<Post>, Error> {
        self.posts
            .find_for_timeline(user_id, DEFAULT_POST_PAGE_SIZE, page * DEFAULT_POST_PAGE_SIZE)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::ports::MockPostRepository;

    #[tokio::test]
    async fn pages_map_to_the_default_window() {
        let user_id = UserId::random();
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_for_timeline()
            .with(
                eq(user_id),
                eq(DEFAULT_POST_PAGE_SIZE),
                eq(2 * DEFAULT_POST_PAGE_SIZE),
            )
            .times(1)
            .return_once(|_, _, _| Ok(Vec::new()));

        let usecase = ListPosts::new(Arc::new(posts));
        let page = usecase.timeline(&user_id, 2).await.expect("timeline lists");
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn the_first_page_starts_at_offset_zero() {
        let user_id = UserId::random();
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_user_id()
            .with(eq(user_id), eq(DEFAULT_POST_PAGE_SIZE), eq(0u32))
            .times(1)
            .return_once(|_, _, _| Ok(Vec::new()));

        let usecase = ListPosts::new(Arc::new(posts));
        usecase
            .by_user(&user_id, 0)
            .await
            .expect("listing succeeds");
    }
}
