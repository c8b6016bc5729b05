//! `t_posts` table adapter, plus the `create_post` database function.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::domain::ports::{NewPost, PostPatch, PostRepository, RepositoryError};
use crate::domain::post::Post;
use crate::domain::{PostId, UserId};

use super::dto::PostRow;
use super::SupabaseConnection;

const TABLE: &str = "t_posts";
/// Join selection pulling each post's media rows alongside it.
const SELECT_WITH_MEDIAS: &str = "*,t_post_medias(*)";

/// Arguments of the `create_post` database function. The function derives
/// the author from the caller's session, so no user id travels in the body.
#[derive(Debug, Serialize)]
struct CreatePostArgs<'a> {
    timeline_type: &'a str,
    text: &'a str,
    medias: Vec<RpcMedia<'a>>,
}

#[derive(Debug, Serialize)]
struct RpcMedia<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    url: &'a str,
    display_order: u32,
}

impl<'a> CreatePostArgs<'a> {
    fn from_input(input: &'a NewPost) -> Self {
        Self {
            timeline_type: "post",
            text: &input.text,
            medias: input
                .medias
                .iter()
                .map(|media| RpcMedia {
                    kind: media.kind.as_str(),
                    url: &media.url,
                    display_order: media.display_order,
                })
                .collect(),
        }
    }
}

/// Timeline filter: own posts plus posts by followed users.
fn timeline_filter(user_id: &UserId) -> String {
    format!(
        "user_id.eq.{user_id},user_id.in.(select following_user_id from t_user_follows where follower_user_id = '{user_id}')"
    )
}

#[derive(Debug)]
pub struct SupabasePostRepository {
    connection: Arc<SupabaseConnection>,
}

impl SupabasePostRepository {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }

    async fn page(
        &self,
        extra_filter: (&str, String),
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Post>, RepositoryError> {
        let rows: Vec<PostRow> = self
            .connection
            .select(
                TABLE,
                &[
                    ("select", SELECT_WITH_MEDIAS.to_owned()),
                    extra_filter,
                    ("order", "created_at.desc".to_owned()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(PostRow::into_domain).collect())
    }
}

#[async_trait]
impl PostRepository for SupabasePostRepository {
    async fn create(&self, input: &NewPost) -> Result<Post, RepositoryError> {
        let created_id: PostId = self
            .connection
            .rpc("create_post", &CreatePostArgs::from_input(input))
            .await?;
        self.find_by_id(&created_id)
            .await?
            .ok_or_else(|| RepositoryError::backend("post not found after create"))
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let row: Option<PostRow> = self
            .connection
            .select_one(
                TABLE,
                &[
                    ("select", SELECT_WITH_MEDIAS.to_owned()),
                    ("id", format!("eq.{id}")),
                ],
            )
            .await?;
        Ok(row.map(PostRow::into_domain))
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Post>, RepositoryError> {
        self.page(("user_id", format!("eq.{user_id}")), limit, offset)
            .await
    }

    async fn update(&self, id: &PostId, patch: &PostPatch) -> Result<Post, RepositoryError> {
        let mut document = serde_json::Map::new();
        if let Some(text) = &patch.text {
            document.insert("text".to_owned(), json!(text));
        }
        document.insert("updated_at".to_owned(), json!(Utc::now().to_rfc3339()));

        self.connection
            .update_void(TABLE, &[("id", format!("eq.{id}"))], &document)
            .await?;
        // Re-fetch to return the row with its media join.
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::backend("post not found after update"))
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepositoryError> {
        self.connection
            .delete_where(TABLE, &[("id", format!("eq.{id}"))])
            .await
    }

    async fn find_for_timeline(
        &self,
        user_id: &UserId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Post>, RepositoryError> {
        self.page(("or", timeline_filter(user_id)), limit, offset)
            .await
    }
}
