//! `t_users` table adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::user::{ScreenName, User};
use crate::domain::UserId;

use super::dto::UserRow;
use super::SupabaseConnection;

const TABLE: &str = "t_users";

#[derive(Debug)]
pub struct SupabaseUserRepository {
    connection: Arc<SupabaseConnection>,
}

impl SupabaseUserRepository {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = self
            .connection
            .select_one(
                TABLE,
                &[("select", "*".to_owned()), ("id", format!("eq.{id}"))],
            )
            .await?;
        Ok(row.map(UserRow::into_domain))
    }

    async fn find_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = self
            .connection
            .select_one(
                TABLE,
                &[
                    ("select", "*".to_owned()),
                    ("screen_name", format!("eq.{}", screen_name.as_ref())),
                ],
            )
            .await?;
        Ok(row.map(UserRow::into_domain))
    }

    async fn exists_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<bool, RepositoryError> {
        // Narrow-column probe; the row content is irrelevant.
        let row: Option<serde_json::Value> = self
            .connection
            .select_one(
                TABLE,
                &[
                    ("select", "id".to_owned()),
                    ("screen_name", format!("eq.{}", screen_name.as_ref())),
                ],
            )
            .await?;
        Ok(row.is_some())
    }

    async fn update_screen_name(
        &self,
        id: &UserId,
        screen_name: &ScreenName,
    ) -> Result<(), RepositoryError> {
        self.connection
            .update_void(
                TABLE,
                &[("id", format!("eq.{id}"))],
                &json!({ "screen_name": screen_name.as_ref() }),
            )
            .await
    }
}
