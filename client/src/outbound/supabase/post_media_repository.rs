//! `t_post_medias` table adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use crate::domain::ports::{NewStoredMedia, PostMediaPatch, PostMediaRepository, RepositoryError};
use crate::domain::post::PostMedia;
use crate::domain::{PostId, PostMediaId};

use super::dto::PostMediaRow;
use super::SupabaseConnection;

const TABLE: &str = "t_post_medias";

#[derive(Debug, Serialize)]
struct NewMediaRow<'a> {
    post_id: &'a PostId,
    #[serde(rename = "type")]
    kind: &'a str,
    url: &'a str,
    display_order: u32,
}

#[derive(Debug)]
pub struct SupabasePostMediaRepository {
    connection: Arc<SupabaseConnection>,
}

impl SupabasePostMediaRepository {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PostMediaRepository for SupabasePostMediaRepository {
    async fn create(&self, input: &NewStoredMedia) -> Result<PostMedia, RepositoryError> {
        let row: PostMediaRow = self
            .connection
            .insert(
                TABLE,
                &NewMediaRow {
                    post_id: &input.post_id,
                    kind: input.kind.as_str(),
                    url: &input.url,
                    display_order: input.display_order,
                },
            )
            .await?;
        Ok(row.into_domain())
    }

    async fn find_by_id(&self, id: &PostMediaId) -> Result<Option<PostMedia>, RepositoryError> {
        let row: Option<PostMediaRow> = self
            .connection
            .select_one(
                TABLE,
                &[("select", "*".to_owned()), ("id", format!("eq.{id}"))],
            )
            .await?;
        Ok(row.map(PostMediaRow::into_domain))
    }

    async fn find_by_post_id(
        &self,
        post_id: &PostId,
    ) -> Result<Vec<PostMedia>, RepositoryError> {
        let rows: Vec<PostMediaRow> = self
            .connection
            .select(
                TABLE,
                &[
                    ("select", "*".to_owned()),
                    ("post_id", format!("eq.{post_id}")),
                    ("order", "display_order.asc".to_owned()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(PostMediaRow::into_domain).collect())
    }

    async fn update(
        &self,
        id: &PostMediaId,
        patch: &PostMediaPatch,
    ) -> Result<PostMedia, RepositoryError> {
        let mut document = serde_json::Map::new();
        if let Some(url) = &patch.url {
            document.insert("url".to_owned(), json!(url));
        }
        if let Some(display_order) = patch.display_order {
            document.insert("display_order".to_owned(), json!(display_order));
        }
        // PostgREST rejects a PATCH with an empty document; a no-op patch
        // reads the current row instead.
        if document.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepositoryError::backend("no media row matched the update"));
        }

        let row: Option<PostMediaRow> = self
            .connection
            .update(TABLE, &[("id", format!("eq.{id}"))], &document)
            .await?;
        row.map(PostMediaRow::into_domain)
            .ok_or_else(|| RepositoryError::backend("no media row matched the update"))
    }

    async fn delete(&self, id: &PostMediaId) -> Result<(), RepositoryError> {
        self.connection
            .delete_where(TABLE, &[("id", format!("eq.{id}"))])
            .await
    }

    async fn delete_by_post_id(&self, post_id: &PostId) -> Result<(), RepositoryError> {
        self.connection
            .delete_where(TABLE, &[("post_id", format!("eq.{post_id}"))])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaKind;

    #[test]
    fn insert_rows_use_wire_column_names() {
        let post_id = PostId::random();
        let body = serde_json::to_value(NewMediaRow {
            post_id: &post_id,
            kind: MediaKind::Video.as_str(),
            url: "https://cdn.example/clip.mp4",
            display_order: 2,
        })
        .expect("serialises");

        assert_eq!(body["post_id"], post_id.to_string());
        assert_eq!(body["type"], "video");
        assert_eq!(body["display_order"], 2);
    }
}
