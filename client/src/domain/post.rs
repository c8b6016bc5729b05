//! Post aggregate and its owned media items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{PostId, PostMediaId, UserId};

/// Maximum allowed length of a post's text.
pub const POST_TEXT_MAX: usize = 200;
/// Maximum number of media items attachable to one post.
pub const MAX_MEDIA_COUNT: usize = 4;

/// Validation errors raised by [`PostText`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostValidationError {
    #[error("post text must not be empty")]
    EmptyText,
    #[error("post text must be at most {POST_TEXT_MAX} characters")]
    TextTooLong,
}

/// Validated post body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostText(String);

impl PostText {
    /// Validate and construct a [`PostText`].
    pub fn new(text: impl Into<String>) -> Result<Self, PostValidationError> {
        let raw = text.into();
        if raw.trim().is_empty() {
            return Err(PostValidationError::EmptyText);
        }
        if raw.chars().count() > POST_TEXT_MAX {
            return Err(PostValidationError::TextTooLong);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<PostText> for String {
    fn from(value: PostText) -> Self {
        value.0
    }
}

/// Kind of a post media item, `image`/`video` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Media row from `t_post_medias`, owned by exactly one post.
///
/// ## Invariants
/// - `display_order` values are unique and contiguous within a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMedia {
    pub id: PostMediaId,
    pub post_id: PostId,
    pub kind: MediaKind,
    pub url: String,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
}

/// Post row from `t_posts` with its media joined in.
///
/// ## Invariants
/// - `medias` is sorted by `display_order` ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub text: String,
    pub referenced_post_id: Option<PostId>,
    pub medias: Vec<PostMedia>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// True when the post carries at least one media item.
    pub fn has_media(&self) -> bool {
        !self.medias.is_empty()
    }

    /// Image media items in display order.
    pub fn image_medias(&self) -> impl Iterator<Item = &PostMedia> {
        self.medias
            .iter()
            .filter(|media| media.kind == MediaKind::Image)
    }

    /// Video media items in display order.
    pub fn video_medias(&self) -> impl Iterator<Item = &PostMedia> {
        self.medias
            .iter()
            .filter(|media| media.kind == MediaKind::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(kind: MediaKind, display_order: u32) -> PostMedia {
        PostMedia {
            id: PostMediaId::random(),
            post_id: PostId::random(),
            kind,
            url: format!("https://cdn.example/{display_order}"),
            display_order,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn post_text_rejects_blank_and_overlong_input() {
        assert_eq!(PostText::new("  "), Err(PostValidationError::EmptyText));
        assert_eq!(
            PostText::new("x".repeat(POST_TEXT_MAX + 1)),
            Err(PostValidationError::TextTooLong)
        );
        assert!(PostText::new("hello").is_ok());
    }

    #[test]
    fn media_kind_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Image).expect("serializes"),
            "\"image\""
        );
        assert_eq!(MediaKind::Video.as_str(), "video");
    }

    #[test]
    fn media_filters_split_by_kind() {
        let post = Post {
            id: PostId::random(),
            user_id: UserId::random(),
            text: "hello".to_owned(),
            referenced_post_id: None,
            medias: vec![
                media(MediaKind::Image, 0),
                media(MediaKind::Image, 1),
                media(MediaKind::Video, 2),
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(post.has_media());
        assert_eq!(post.image_medias().count(), 2);
        assert_eq!(post.video_medias().count(), 1);
    }
}
