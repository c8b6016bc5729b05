//! User identity, profile, and the read-optimised detail view.
//!
//! Validated newtypes guard the write path; read models decoded from
//! backend rows keep plain `String` fields and are trusted as stored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::UserId;

/// Minimum allowed length for a screen name.
pub const SCREEN_NAME_MIN: usize = 4;
/// Maximum allowed length for a screen name.
pub const SCREEN_NAME_MAX: usize = 16;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 20;
/// Maximum allowed length for a self introduction.
pub const SELF_INTRODUCTION_MAX: usize = 160;
/// Maximum allowed number of lines in a self introduction.
pub const SELF_INTRODUCTION_MAX_LINES: usize = 5;

/// Validation errors raised by the user input newtypes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    #[error("screen name must be between {SCREEN_NAME_MIN} and {SCREEN_NAME_MAX} characters")]
    ScreenNameLength,
    #[error("screen name may only contain letters, numbers, or underscores")]
    ScreenNameInvalidCharacters,
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {DISPLAY_NAME_MAX} characters")]
    DisplayNameTooLong,
    #[error("self introduction must be at most {SELF_INTRODUCTION_MAX} characters")]
    SelfIntroductionTooLong,
    #[error("self introduction must be at most {SELF_INTRODUCTION_MAX_LINES} lines")]
    SelfIntroductionTooManyLines,
}

/// Unique user handle, mutable only through the dedicated update flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScreenName(String);

impl ScreenName {
    /// Validate and construct a [`ScreenName`].
    pub fn new(screen_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = screen_name.into();
        let length = raw.chars().count();
        if !(SCREEN_NAME_MIN..=SCREEN_NAME_MAX).contains(&length) {
            return Err(UserValidationError::ScreenNameLength);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(UserValidationError::ScreenNameInvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for ScreenName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ScreenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ScreenName> for String {
    fn from(value: ScreenName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ScreenName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNameText(String);

impl DisplayNameText {
    /// Validate and construct a [`DisplayNameText`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = display_name.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if raw.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for DisplayNameText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DisplayNameText> for String {
    fn from(value: DisplayNameText) -> Self {
        value.0
    }
}

/// Free-form self introduction shown on a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfIntroduction(String);

impl SelfIntroduction {
    /// Validate and construct a [`SelfIntroduction`].
    pub fn new(text: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = text.into();
        if raw.chars().count() > SELF_INTRODUCTION_MAX {
            return Err(UserValidationError::SelfIntroductionTooLong);
        }
        if raw.lines().count() > SELF_INTRODUCTION_MAX_LINES {
            return Err(UserValidationError::SelfIntroductionTooManyLines);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for SelfIntroduction {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SelfIntroduction> for String {
    fn from(value: SelfIntroduction) -> Self {
        value.0
    }
}

/// Identity row from `t_users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub screen_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Mutable profile row from `t_user_profiles`, 1:1 with [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub self_introduction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Read-only join of [`User`] and [`UserProfile`] from `v_user_details`.
///
/// Never written directly; mutations go through the underlying tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    pub user_id: UserId,
    pub screen_name: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub self_introduction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Presentation wrapper over a [`UserDetail`] view row.
///
/// Derived, never persisted. The store rebuilds it when an update
/// succeeds so the cached entry reflects the committed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteUser {
    detail: UserDetail,
}

impl SuiteUser {
    /// Wrap a view row.
    pub fn new(detail: UserDetail) -> Self {
        Self { detail }
    }

    /// Stable user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.detail.user_id
    }

    /// Unique handle.
    pub fn screen_name(&self) -> &str {
        self.detail.screen_name.as_str()
    }

    /// Display name, when the profile has one.
    pub fn display_name(&self) -> Option<&str> {
        self.detail.display_name.as_deref()
    }

    /// Avatar public URL, when the profile has one.
    pub fn avatar_url(&self) -> Option<&str> {
        self.detail.avatar_url.as_deref()
    }

    /// Self introduction, when the profile has one.
    pub fn self_introduction(&self) -> Option<&str> {
        self.detail.self_introduction.as_deref()
    }

    /// Underlying view row.
    pub fn detail(&self) -> &UserDetail {
        &self.detail
    }

    /// Copy with the screen name replaced by a committed change.
    pub fn with_screen_name(&self, screen_name: &ScreenName) -> Self {
        let mut detail = self.detail.clone();
        detail.screen_name = screen_name.as_ref().to_owned();
        Self { detail }
    }

    /// Copy with profile fields replaced by a committed profile row.
    pub fn with_profile(&self, profile: &UserProfile) -> Self {
        let mut detail = self.detail.clone();
        detail.display_name = profile.display_name.clone();
        detail.avatar_url = profile.avatar_url.clone();
        detail.self_introduction = profile.self_introduction.clone();
        Self { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detail() -> UserDetail {
        UserDetail {
            user_id: UserId::random(),
            screen_name: "ada_l".to_owned(),
            display_name: Some("Ada".to_owned()),
            avatar_url: None,
            self_introduction: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn screen_name_enforces_length_bounds() {
        assert_eq!(
            ScreenName::new("abc"),
            Err(UserValidationError::ScreenNameLength)
        );
        assert_eq!(
            ScreenName::new("a".repeat(17)),
            Err(UserValidationError::ScreenNameLength)
        );
        assert!(ScreenName::new("ada_lovelace").is_ok());
    }

    #[test]
    fn screen_name_rejects_punctuation() {
        assert_eq!(
            ScreenName::new("ada.l"),
            Err(UserValidationError::ScreenNameInvalidCharacters)
        );
    }

    #[test]
    fn display_name_rejects_blank_and_overlong_input() {
        assert_eq!(
            DisplayNameText::new("   "),
            Err(UserValidationError::EmptyDisplayName)
        );
        assert_eq!(
            DisplayNameText::new("x".repeat(21)),
            Err(UserValidationError::DisplayNameTooLong)
        );
    }

    #[test]
    fn self_introduction_enforces_line_limit() {
        assert_eq!(
            SelfIntroduction::new("a\nb\nc\nd\ne\nf"),
            Err(UserValidationError::SelfIntroductionTooManyLines)
        );
        assert!(SelfIntroduction::new("hello\nworld").is_ok());
    }

    #[test]
    fn with_screen_name_replaces_only_the_handle() {
        let user = SuiteUser::new(sample_detail());
        let renamed = user.with_screen_name(&ScreenName::new("new_name").expect("valid name"));
        assert_eq!(renamed.screen_name(), "new_name");
        assert_eq!(renamed.display_name(), user.display_name());
    }

    #[test]
    fn with_profile_overwrites_profile_fields() {
        let user = SuiteUser::new(sample_detail());
        let profile = UserProfile {
            user_id: *user.user_id(),
            display_name: Some("Countess".to_owned()),
            avatar_url: Some("https://cdn.example/a.png".to_owned()),
            self_introduction: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        let merged = user.with_profile(&profile);
        assert_eq!(merged.display_name(), Some("Countess"));
        assert_eq!(merged.avatar_url(), Some("https://cdn.example/a.png"));
        assert_eq!(merged.self_introduction(), None);
        assert_eq!(merged.screen_name(), user.screen_name());
    }
}
