//! Row payloads decoded from PostgREST responses.
//!
//! Each row type mirrors one table or view and converts into its domain
//! entity with `into_domain`. Rows stay private to the Supabase adapters.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::post::{MediaKind, Post, PostMedia};
use crate::domain::user::{User, UserDetail, UserProfile};
use crate::domain::{PostId, PostMediaId, UserId};

/// Row from `t_users`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRow {
    pub id: UserId,
    pub screen_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> User {
        User {
            id: self.id,
            screen_name: self.screen_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

/// Row from `t_user_profiles`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserProfileRow {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub self_introduction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserProfileRow {
    pub(crate) fn into_domain(self) -> UserProfile {
        UserProfile {
            user_id: self.user_id,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            self_introduction: self.self_introduction,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

/// Row from the `v_user_details` read view.
#[derive(Debug, Deserialize)]
pub(crate) struct UserDetailRow {
    pub user_id: UserId,
    pub screen_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub self_introduction: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDetailRow {
    pub(crate) fn into_domain(self) -> UserDetail {
        UserDetail {
            user_id: self.user_id,
            screen_name: self.screen_name,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            self_introduction: self.self_introduction,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Row from `t_post_medias`.
#[derive(Debug, Deserialize)]
pub(crate) struct PostMediaRow {
    pub id: PostMediaId,
    pub post_id: PostId,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
}

impl PostMediaRow {
    pub(crate) fn into_domain(self) -> PostMedia {
        PostMedia {
            id: self.id,
            post_id: self.post_id,
            kind: self.kind,
            url: self.url,
            display_order: self.display_order,
            created_at: self.created_at,
        }
    }
}

/// Row from `t_posts`, with `t_post_medias` embedded when the query asks
/// for the join.
#[derive(Debug, Deserialize)]
pub(crate) struct PostRow {
    pub id: PostId,
    pub user_id: UserId,
    pub text: String,
    #[serde(default)]
    pub referenced_post_id: Option<PostId>,
    #[serde(default, rename = "t_post_medias")]
    pub medias: Vec<PostMediaRow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostRow {
    pub(crate) fn into_domain(self) -> Post {
        let mut medias: Vec<PostMedia> = self
            .medias
            .into_iter()
            .map(PostMediaRow::into_domain)
            .collect();
        medias.sort_by_key(|media| media.display_order);
        Post {
            id: self.id,
            user_id: self.user_id,
            text: self.text,
            referenced_post_id: self.referenced_post_id,
            medias,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
