//! Driving ports consumed by the user store.
//!
//! The store calls these instead of importing concrete usecases, so store
//! tests substitute deterministic doubles and usecase wiring stays in the
//! composition root.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::field_update::FieldUpdate;
use crate::domain::user::{DisplayNameText, ScreenName, SelfIntroduction, SuiteUser, UserProfile};
use crate::domain::UserId;

/// Profile mutations a caller can request in one call.
///
/// Screen-name changes are deliberately not expressible here; they go
/// through [`ScreenNameUpdater`] so the handle keeps its dedicated flow.
/// `avatar` carries a local file path when set; the upload happens inside
/// the usecase and the stored column receives the resulting public URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileChanges {
    pub avatar: FieldUpdate<String>,
    pub display_name: FieldUpdate<DisplayNameText>,
    pub self_introduction: FieldUpdate<SelfIntroduction>,
}

impl ProfileChanges {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.avatar.is_unset()
            && self.display_name.is_unset()
            && self.self_introduction.is_unset()
    }
}

/// Driving port for loading a user's presentation view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuiteUserFinder: Send + Sync {
    /// Load the presentation view for a user id.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<SuiteUser>, Error>;
}

/// Driving port for committing a screen-name change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScreenNameUpdater: Send + Sync {
    /// Persist the new screen name for the user.
    async fn update_screen_name(
        &self,
        user_id: &UserId,
        screen_name: &ScreenName,
    ) -> Result<(), Error>;
}

/// Driving port for committing profile changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileUpdater: Send + Sync {
    /// Persist the requested changes and return the stored profile row.
    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error>;
}
