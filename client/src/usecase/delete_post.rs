//! Remove a post together with its media rows.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::ports::{PostMediaRepository, PostRepository};
use crate::domain::{Error, PostId};

/// Delete a post. Media rows go first so the post row never outlives a
/// dangling media reference; the post row is removed only once the media
/// delete succeeded.
#[derive(Debug)]
pub struct DeletePost<P, M> {
    posts: Arc<P>,
    medias: Arc<M>,
}

impl<P, M> DeletePost<P, M> {
    pub fn new(posts: Arc<P>, medias: Arc<M>) -> Self {
        Self { posts, medias }
    }
}

impl<P: PostRepository, M: PostMediaRepository> DeletePost<P, M> {
    #[instrument(skip(self))]
    pub async fn execute(&self, post_id: &PostId) -> Result<(), Error> {
        self.medias.delete_by_post_id(post_id).await?;
        self.posts.delete(post_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        MockPostMediaRepository, MockPostRepository, RepositoryError,
    };
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn deletes_media_rows_then_the_post() {
        let post_id = PostId::random();
        let mut medias = MockPostMediaRepository::new();
        medias
            .expect_delete_by_post_id()
            .withf(move |id| *id == post_id)
            .times(1)
            .return_once(|_| Ok(()));
        let mut posts = MockPostRepository::new();
        posts
            .expect_delete()
            .withf(move |id| *id == post_id)
            .times(1)
            .return_once(|_| Ok(()));

        DeletePost::new(Arc::new(posts), Arc::new(medias))
            .execute(&post_id)
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn failed_media_delete_keeps_the_post_row() {
        let post_id = PostId::random();
        let mut medias = MockPostMediaRepository::new();
        medias
            .expect_delete_by_post_id()
            .return_once(|_| Err(RepositoryError::backend("constraint violation")));
        let posts = MockPostRepository::new();

        let err = DeletePost::new(Arc::new(posts), Arc::new(medias))
            .execute(&post_id)
            .await
            .expect_err("delete fails");
        assert_eq!(err.code(), ErrorCode::Backend);
    }
}
