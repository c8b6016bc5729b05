//! Port abstraction over the `v_user_details` read view.

use async_trait::async_trait;

use crate::domain::user::{ScreenName, UserDetail};
use crate::domain::UserId;

use super::RepositoryError;

/// Driven port for the read-optimised user detail view.
///
/// The view is read-only; there is no write counterpart.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDetailQuery: Send + Sync {
    /// Fetch the joined detail row by user id.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserDetail>, RepositoryError>;

    /// Fetch the joined detail row by screen name.
    async fn find_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<Option<UserDetail>, RepositoryError>;
}
