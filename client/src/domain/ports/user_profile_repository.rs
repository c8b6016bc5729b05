//! Port abstraction over the `t_user_profiles` table.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::field_update::FieldUpdate;
use crate::domain::user::UserProfile;
use crate::domain::UserId;

use super::RepositoryError;

/// Selective update of profile columns.
///
/// `Unset` fields never appear in the PATCH payload; `Clear` writes SQL
/// NULL; `Set` writes the value. Identity and timestamp columns are not
/// updatable through this path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfilePatch {
    pub avatar_url: FieldUpdate<String>,
    pub display_name: FieldUpdate<String>,
    pub self_introduction: FieldUpdate<String>,
}

impl ProfilePatch {
    /// True when no column would change.
    pub fn is_empty(&self) -> bool {
        self.avatar_url.is_unset()
            && self.display_name.is_unset()
            && self.self_introduction.is_unset()
    }

    /// Build the JSON update document sent to the backend.
    pub fn to_update_document(&self) -> Map<String, Value> {
        let mut document = Map::new();
        Self::write_field(&mut document, "avatar_url", &self.avatar_url);
        Self::write_field(&mut document, "display_name", &self.display_name);
        Self::write_field(&mut document, "self_introduction", &self.self_introduction);
        document
    }

    fn write_field(document: &mut Map<String, Value>, column: &str, field: &FieldUpdate<String>) {
        match field {
            FieldUpdate::Unset => {}
            FieldUpdate::Clear => {
                document.insert(column.to_owned(), Value::Null);
            }
            FieldUpdate::Set(value) => {
                document.insert(column.to_owned(), Value::String(value.clone()));
            }
        }
    }
}

/// Driven port for user profile rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Fetch a profile by its owning user id.
    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<UserProfile>, RepositoryError>;

    /// Apply a selective update and return the updated row.
    async fn update_selective(
        &self,
        user_id: &UserId,
        patch: &ProfilePatch,
    ) -> Result<UserProfile, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted_from_the_document() {
        let patch = ProfilePatch {
            display_name: FieldUpdate::Set("Ada".to_owned()),
            ..ProfilePatch::default()
        };
        let document = patch.to_update_document();
        assert_eq!(document.len(), 1);
        assert_eq!(document.get("display_name"), Some(&Value::String("Ada".into())));
        assert!(!document.contains_key("avatar_url"));
    }

    #[test]
    fn clear_serialises_as_json_null() {
        let patch = ProfilePatch {
            avatar_url: FieldUpdate::Clear,
            ..ProfilePatch::default()
        };
        let document = patch.to_update_document();
        assert_eq!(document.get("avatar_url"), Some(&Value::Null));
    }

    #[test]
    fn empty_patch_produces_an_empty_document() {
        let patch = ProfilePatch::default();
        assert!(patch.is_empty());
        assert!(patch.to_update_document().is_empty());
    }
}
