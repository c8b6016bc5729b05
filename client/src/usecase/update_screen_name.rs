//! Screen-name change commit.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::ports::{ScreenNameUpdater, UserRepository};
use crate::domain::{Error, ScreenName, UserId};

/// Persist a new screen name for a user.
///
/// Availability is the caller's responsibility via
/// [`CheckScreenNameExistence`](super::CheckScreenNameExistence); there is
/// no re-check here, so a second writer can claim the name between check
/// and commit.
#[derive(Debug)]
pub struct UpdateScreenName<R> {
    users: Arc<R>,
}

impl<R> UpdateScreenName<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R: UserRepository> UpdateScreenName<R> {
    /// Commit the change.
    #[instrument(skip(self), fields(user_id = %user_id, screen_name = %screen_name))]
    pub async fn execute(&self, user_id: &UserId, screen_name: &ScreenName) -> Result<(), Error> {
        self.users
            .update_screen_name(user_id, screen_name)
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<R: UserRepository> ScreenNameUpdater for UpdateScreenName<R> {
    async fn update_screen_name(
        &self,
        user_id: &UserId,
        screen_name: &ScreenName,
    ) -> Result<(), Error> {
        self.execute(user_id, screen_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserRepository, RepositoryError};
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn commits_through_the_repository() {
        let user_id = UserId::random();
        let mut users = MockUserRepository::new();
        users
            .expect_update_screen_name()
            .withf(move |id, name| *id == user_id && name.as_ref() == "new_name")
            .times(1)
            .return_once(|_, _| Ok(()));

        let usecase = UpdateScreenName::new(Arc::new(users));
        usecase
            .execute(&user_id, &ScreenName::new("new_name").expect("valid name"))
            .await
            .expect("update succeeds");
    }

    #[tokio::test]
    async fn propagates_backend_failures() {
        let mut users = MockUserRepository::new();
        users
            .expect_update_screen_name()
            .return_once(|_, _| Err(RepositoryError::backend("duplicate key")));

        let usecase = UpdateScreenName::new(Arc::new(users));
        let err = usecase
            .execute(
                &UserId::random(),
                &ScreenName::new("new_name").expect("valid name"),
            )
            .await
            .expect_err("update fails");
        assert_eq!(err.code(), ErrorCode::Backend);
    }
}
