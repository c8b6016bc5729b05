//! Usecases: one orchestration unit per user intent.
//!
//! Each usecase sequences one to three port calls with no business rule
//! beyond input shaping. Errors propagate unchanged as [`crate::domain::Error`];
//! there is no local recovery or retry.

mod check_screen_name;
mod create_post;
mod delete_post;
mod find_suite_user;
mod list_posts;
mod session;
mod update_screen_name;
mod update_user_profile;
mod upload_post_media;

pub use self::check_screen_name::CheckScreenNameExistence;
pub use self::create_post::{CreatePost, CreatePostInput};
pub use self::delete_post::DeletePost;
pub use self::find_suite_user::FindSuiteUser;
pub use self::list_posts::ListPosts;
pub use self::session::{CurrentUserId, SignIn, SignInRequest, SignOut};
pub use self::update_screen_name::UpdateScreenName;
pub use self::update_user_profile::UpdateUserProfile;
pub use self::upload_post_media::{UploadPostMedia, UploadPostMediaInput, UploadPostMediaOutput};

use crate::domain::MediaKind;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];
const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "webm"];
const DEFAULT_IMAGE_EXTENSION: &str = "jpg";
const DEFAULT_VIDEO_EXTENSION: &str = "mp4";

/// Extension for an uploaded media file, taken from the trailing segment
/// of the source URL (query string stripped, lower-cased) and validated
/// against the whitelist for the kind; falls back to the kind's default.
fn media_file_extension(source_url: &str, kind: MediaKind) -> String {
    let trailing = source_url.rsplit('.').next().unwrap_or_default();
    let extension = trailing
        .split('?')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let (whitelist, fallback): (&[&str], &str) = match kind {
        MediaKind::Image => (&IMAGE_EXTENSIONS, DEFAULT_IMAGE_EXTENSION),
        MediaKind::Video => (&VIDEO_EXTENSIONS, DEFAULT_VIDEO_EXTENSION),
    };
    if whitelist.contains(&extension.as_str()) {
        extension
    } else {
        fallback.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("file:///tmp/photo.PNG", MediaKind::Image, "png")]
    #[case("file:///tmp/photo.png?cache=1", MediaKind::Image, "png")]
    #[case("file:///tmp/photo.heic", MediaKind::Image, "jpg")]
    #[case("file:///tmp/clip.MOV", MediaKind::Video, "mov")]
    #[case("file:///tmp/clip.mkv", MediaKind::Video, "mp4")]
    #[case("no-extension", MediaKind::Image, "jpg")]
    fn extension_detection_and_fallbacks(
        #[case] url: &str,
        #[case] kind: MediaKind,
        #[case] expected: &str,
    ) {
        assert_eq!(media_file_extension(url, kind), expected);
    }
}
