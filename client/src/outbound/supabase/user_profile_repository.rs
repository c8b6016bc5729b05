//! `t_user_profiles` table adapter.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{ProfilePatch, RepositoryError, UserProfileRepository};
use crate::domain::user::UserProfile;
use crate::domain::UserId;

use super::dto::UserProfileRow;
use super::SupabaseConnection;

const TABLE: &str = "t_user_profiles";

#[derive(Debug)]
pub struct SupabaseUserProfileRepository {
    connection: Arc<SupabaseConnection>,
}

impl SupabaseUserProfileRepository {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }

    async fn fetch(&self, user_id: &UserId) -> Result<Option<UserProfileRow>, RepositoryError> {
        self.connection
            .select_one(
                TABLE,
                &[
                    ("select", "*".to_owned()),
                    ("user_id", format!("eq.{user_id}")),
                ],
            )
            .await
    }
}

#[async_trait]
impl UserProfileRepository for SupabaseUserProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self.fetch(user_id).await?.map(UserProfileRow::into_domain))
    }

    async fn update_selective(
        &self,
        user_id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<UserProfile, RepositoryError> {
        // PostgREST rejects a PATCH with an empty document; a no-op patch
        // reads the current row instead.
        if patch.is_empty() {
            return self
                .fetch(user_id)
                .await?
                .map(UserProfileRow::into_domain)
                .ok_or_else(|| RepositoryError::backend("no profile row matched the update"));
        }

        let row: Option<UserProfileRow> = self
            .connection
            .update(
                TABLE,
                &[("user_id", format!("eq.{user_id}"))],
                &patch.to_update_document(),
            )
            .await?;
        row.map(UserProfileRow::into_domain)
            .ok_or_else(|| RepositoryError::backend("no profile row matched the update"))
    }
}
