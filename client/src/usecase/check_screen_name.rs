//! Screen-name availability check.

use std::sync::Arc;

use tracing::instrument;

use crate::domain::ports::UserRepository;
use crate::domain::{Error, ScreenName};

/// Ask the backend whether a screen name is already taken.
///
/// Passthrough to the narrow-column existence lookup; callers decide what
/// to do with the answer. The check is not atomic with any later update.
#[derive(Debug)]
pub struct CheckScreenNameExistence<R> {
    users: Arc<R>,
}

impl<R> CheckScreenNameExistence<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R: UserRepository> CheckScreenNameExistence<R> {
    /// True when a user already holds the screen name.
    #[instrument(skip(self), fields(screen_name = %screen_name))]
    pub async fn execute(&self, screen_name: &ScreenName) -> Result<bool, Error> {
        self.users
            .exists_by_screen_name(screen_name)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserRepository, RepositoryError};
    use crate::domain::ErrorCode;

    fn name() -> ScreenName {
        ScreenName::new("ada_lovelace").expect("valid screen name")
    }

    #[tokio::test]
    async fn reports_the_repository_answer() {
        let mut users = MockUserRepository::new();
        users
            .expect_exists_by_screen_name()
            .times(1)
            .return_once(|_| Ok(true));

        let usecase = CheckScreenNameExistence::new(Arc::new(users));
        assert!(usecase.execute(&name()).await.expect("check succeeds"));
    }

    #[tokio::test]
    async fn propagates_backend_failures() {
        let mut users = MockUserRepository::new();
        users
            .expect_exists_by_screen_name()
            .return_once(|_| Err(RepositoryError::backend("status 500")));

        let usecase = CheckScreenNameExistence::new(Arc::new(users));
        let err = usecase.execute(&name()).await.expect_err("check fails");
        assert_eq!(err.code(), ErrorCode::Backend);
    }
}
