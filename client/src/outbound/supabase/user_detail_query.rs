//! `v_user_details` view adapter. Read-only by construction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{RepositoryError, UserDetailQuery};
use crate::domain::user::{ScreenName, UserDetail};
use crate::domain::UserId;

use super::dto::UserDetailRow;
use super::SupabaseConnection;

const VIEW: &str = "v_user_details";

#[derive(Debug)]
pub struct SupabaseUserDetailQuery {
    connection: Arc<SupabaseConnection>,
}

impl SupabaseUserDetailQuery {
    pub fn new(connection: Arc<SupabaseConnection>) -> Self {
        Self { connection }
    }

    async fn find_where(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<UserDetail>, RepositoryError> {
        let row: Option<UserDetailRow> = self
            .connection
            .select_one(
                VIEW,
                &[("select", "*".to_owned()), (column, format!("eq.{value}"))],
            )
            .await?;
        Ok(row.map(UserDetailRow::into_domain))
    }
}

#[async_trait]
impl UserDetailQuery for SupabaseUserDetailQuery {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserDetail>, RepositoryError> {
        self.find_where("user_id", &user_id.to_string()).await
    }

    async fn find_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<Option<UserDetail>, RepositoryError> {
        self.find_where("screen_name", screen_name.as_ref()).await
    }
}
