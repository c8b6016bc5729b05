//! Port abstraction over the `t_users` table.

use async_trait::async_trait;

use crate::domain::user::{ScreenName, User};
use crate::domain::UserId;

use super::RepositoryError;

/// Driven port for user identity rows.
///
/// Lookups resolve to `Ok(None)` when no row matches; only backend
/// operation failures surface as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by primary key.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by screen name.
    async fn find_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<Option<User>, RepositoryError>;

    /// Narrow-column existence check for a screen name.
    ///
    /// The check and any subsequent [`update_screen_name`] are not atomic;
    /// a second writer can claim the name in between.
    ///
    /// [`update_screen_name`]: UserRepository::update_screen_name
    async fn exists_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<bool, RepositoryError>;

    /// Replace the user's screen name.
    async fn update_screen_name(
        &self,
        id: &UserId,
        screen_name: &ScreenName,
    ) -> Result<(), RepositoryError>;
}
