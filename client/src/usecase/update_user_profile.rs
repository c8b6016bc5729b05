//! Profile update with optional avatar upload.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::ports::{
    IdGenerator, ObjectStorage, ProfileChanges, ProfilePatch, ProfileUpdater, StorageBucket,
    UploadPayload, UserProfileRepository,
};
use crate::domain::{Error, FieldUpdate, UserId, UserProfile};

const AVATAR_FOLDER: &str = "avatars";

/// Apply selective profile changes for a user.
///
/// A set avatar is a local file reference: it is uploaded first (fresh
/// UUID as the object name, fixed `{user_id}/avatars` folder) and the
/// public URL replaces the field before the row is patched. Only supplied
/// fields reach the backend.
#[derive(Debug)]
pub struct UpdateUserProfile<R, S, G> {
    profiles: Arc<R>,
    storage: Arc<S>,
    ids: Arc<G>,
}

impl<R, S, G> UpdateUserProfile<R, S, G> {
    pub fn new(profiles: Arc<R>, storage: Arc<S>, ids: Arc<G>) -> Self {
        Self {
            profiles,
            storage,
            ids,
        }
    }
}

impl<R, S, G> UpdateUserProfile<R, S, G>
where
    R: UserProfileRepository,
    S: ObjectStorage,
    G: IdGenerator,
{
    /// Upload the avatar when one was supplied, then patch the row.
    #[instrument(skip(self, changes), fields(user_id = %user_id))]
    pub async fn execute(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error> {
        let avatar_url = match changes.avatar {
            FieldUpdate::Unset => FieldUpdate::Unset,
            FieldUpdate::Clear => FieldUpdate::Clear,
            FieldUpdate::Set(local_uri) => {
                FieldUpdate::Set(self.upload_avatar(user_id, &local_uri).await?)
            }
        };

        let patch = ProfilePatch {
            avatar_url,
            display_name: changes.display_name.map(String::from),
            self_introduction: changes.self_introduction.map(String::from),
        };

        self.profiles
            .update_selective(user_id, &patch)
            .await
            .map_err(Error::from)
    }

    async fn upload_avatar(&self, user_id: &UserId, local_uri: &str) -> Result<String, Error> {
        let filename = self.ids.generate().to_string();
        let folder = format!("{user_id}/{AVATAR_FOLDER}");
        self.storage
            .upload(
                StorageBucket::Users,
                &folder,
                &filename,
                UploadPayload::from_local_uri(local_uri),
            )
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<R, S, G> ProfileUpdater for UpdateUserProfile<R, S, G>
where
    R: UserProfileRepository,
    S: ObjectStorage,
    G: IdGenerator,
{
    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<UserProfile, Error> {
        self.execute(user_id, changes).await
    }
}
