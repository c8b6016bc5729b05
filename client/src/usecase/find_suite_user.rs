//! Presentation-view lookup for a user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::ports::{SuiteUserFinder, UserDetailQuery};
use crate::domain::{Error, ScreenName, SuiteUser, UserId};

/// Load a [`SuiteUser`] from the read view, by id or by screen name.
#[derive(Debug)]
pub struct FindSuiteUser<Q> {
    details: Arc<Q>,
}

impl<Q> FindSuiteUser<Q> {
    pub fn new(details: Arc<Q>) -> Self {
        Self { details }
    }
}

impl<Q: UserDetailQuery> FindSuiteUser<Q> {
    /// Fetch by user id; absent users resolve to `None`.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn execute(&self, user_id: &UserId) -> Result<Option<SuiteUser>, Error> {
        let detail = self
            .details
            .find_by_user_id(user_id)
            .await
            .map_err(Error::from)?;
        Ok(detail.map(SuiteUser::new))
    }

    /// Fetch by screen name; absent users resolve to `None`.
    #[instrument(skip(self), fields(screen_name = %screen_name))]
    pub async fn execute_by_screen_name(
        &self,
        screen_name: &ScreenName,
    ) -> Result<Option<SuiteUser>, Error> {
        let detail = self
            .details
            .find_by_screen_name(screen_name)
            .await
            .map_err(Error::from)?;
        Ok(detail.map(SuiteUser::new))
    }
}

#[async_trait]
impl<Q: UserDetailQuery> SuiteUserFinder for FindSuiteUser<Q> {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<SuiteUser>, Error> {
        self.execute(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::ports::{MockUserDetailQuery, RepositoryError};
    use crate::domain::{ErrorCode, UserDetail};

    fn detail(user_id: &UserId) -> UserDetail {
        UserDetail {
            user_id: *user_id,
            screen_name: "ada_l".to_owned(),
            display_name: Some("Ada".to_owned()),
            avatar_url: None,
            self_introduction: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn wraps_the_view_row() {
        let user_id = UserId::random();
        let row = detail(&user_id);
        let mut details = MockUserDetailQuery::new();
        details
            .expect_find_by_user_id()
            .times(1)
            .return_once(move |_| Ok(Some(row)));

        let usecase = FindSuiteUser::new(Arc::new(details));
        let user = usecase
            .execute(&user_id)
            .await
            .expect("lookup succeeds")
            .expect("user found");
        assert_eq!(user.screen_name(), "ada_l");
        assert_eq!(user.user_id(), &user_id);
    }

    #[tokio::test]
    async fn missing_users_resolve_to_none() {
        let mut details = MockUserDetailQuery::new();
        details.expect_find_by_user_id().return_once(|_| Ok(None));

        let usecase = FindSuiteUser::new(Arc::new(details));
        assert!(usecase
            .execute(&UserId::random())
            .await
            .expect("lookup succeeds")
            .is_none());
    }

    #[tokio::test]
    async fn propagates_backend_failures() {
        let mut details = MockUserDetailQuery::new();
        details
            .expect_find_by_screen_name()
            .return_once(|_| Err(RepositoryError::transport("timed out")));

        let usecase = FindSuiteUser::new(Arc::new(details));
        let err = usecase
            .execute_by_screen_name(&ScreenName::new("ada_l").expect("valid name"))
            .await
            .expect_err("lookup fails");
        assert_eq!(err.code(), ErrorCode::Backend);
    }
}
