//! Composition root wiring Supabase adapters into usecases and the store.
//!
//! Pure dependency injection; no logic lives here. Every adapter shares
//! one [`SupabaseConnection`] so sign-ins propagate to table, storage,
//! and RPC requests alike.

use std::sync::Arc;

use crate::config::SupabaseSettings;
use crate::domain::{Error, ErrorCode};
use crate::outbound::supabase::{
    SupabaseAuthGateway, SupabaseConnection, SupabaseObjectStorage, SupabasePostMediaRepository,
    SupabasePostRepository, SupabaseUserDetailQuery, SupabaseUserProfileRepository,
    SupabaseUserRepository, UuidGenerator,
};
use crate::store::UserStore;
use crate::usecase::{
    CheckScreenNameExistence, CreatePost, CurrentUserId, DeletePost, FindSuiteUser, ListPosts,
    SignIn, SignOut, UpdateScreenName, UpdateUserProfile, UploadPostMedia,
};

/// The store specialised to the wired usecases.
pub type SuiteUserStore = UserStore<
    FindSuiteUser<SupabaseUserDetailQuery>,
    UpdateScreenName<SupabaseUserRepository>,
    UpdateUserProfile<SupabaseUserProfileRepository, SupabaseObjectStorage, UuidGenerator>,
>;

/// Fully wired client: adapters, usecases, store.
#[derive(Debug)]
pub struct App {
    check_screen_name: Arc<CheckScreenNameExistence<SupabaseUserRepository>>,
    create_post: Arc<CreatePost<SupabaseObjectStorage, UuidGenerator, SupabasePostRepository>>,
    delete_post: Arc<DeletePost<SupabasePostRepository, SupabasePostMediaRepository>>,
    list_posts: Arc<ListPosts<SupabasePostRepository>>,
    upload_post_media: Arc<UploadPostMedia<SupabaseObjectStorage, UuidGenerator>>,
    find_suite_user: Arc<FindSuiteUser<SupabaseUserDetailQuery>>,
    sign_in: Arc<SignIn<SupabaseAuthGateway>>,
    sign_out: Arc<SignOut<SupabaseAuthGateway>>,
    current_user_id: Arc<CurrentUserId<SupabaseAuthGateway>>,
    posts: Arc<SupabasePostRepository>,
    post_medias: Arc<SupabasePostMediaRepository>,
    store: Arc<SuiteUserStore>,
}

impl App {
    /// Wire the full dependency graph from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the project URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn connect(settings: &SupabaseSettings) -> Result<Self, Error> {
        let base_url = url::Url::parse(&settings.url).map_err(|error| {
            Error::new(
                ErrorCode::InvalidInput,
                format!("invalid Supabase project URL: {error}"),
            )
        })?;
        let connection = Arc::new(
            SupabaseConnection::new(
                base_url,
                settings.anon_key.clone(),
                settings.request_timeout(),
            )
            .map_err(|error| {
                Error::new(
                    ErrorCode::Internal,
                    format!("could not build HTTP client: {error}"),
                )
            })?,
        );

        let users = Arc::new(SupabaseUserRepository::new(Arc::clone(&connection)));
        let profiles = Arc::new(SupabaseUserProfileRepository::new(Arc::clone(&connection)));
        let details = Arc::new(SupabaseUserDetailQuery::new(Arc::clone(&connection)));
        let posts = Arc::new(SupabasePostRepository::new(Arc::clone(&connection)));
        let post_medias = Arc::new(SupabasePostMediaRepository::new(Arc::clone(&connection)));
        let storage = Arc::new(SupabaseObjectStorage::new(Arc::clone(&connection)));
        let auth = Arc::new(SupabaseAuthGateway::new(Arc::clone(&connection)));
        let ids = Arc::new(UuidGenerator);

        let find_suite_user = Arc::new(FindSuiteUser::new(details));
        let update_screen_name = Arc::new(UpdateScreenName::new(Arc::clone(&users)));
        let update_user_profile = Arc::new(UpdateUserProfile::new(
            profiles,
            Arc::clone(&storage),
            Arc::clone(&ids),
        ));
        let store = Arc::new(UserStore::new(
            Arc::clone(&find_suite_user),
            update_screen_name,
            update_user_profile,
        ));

        Ok(Self {
            check_screen_name: Arc::new(CheckScreenNameExistence::new(users)),
            create_post: Arc::new(CreatePost::new(
                Arc::clone(&storage),
                Arc::clone(&ids),
                Arc::clone(&posts),
            )),
            delete_post: Arc::new(DeletePost::new(
                Arc::clone(&posts),
                Arc::clone(&post_medias),
            )),
            list_posts: Arc::new(ListPosts::new(Arc::clone(&posts))),
            upload_post_media: Arc::new(UploadPostMedia::new(storage, ids)),
            find_suite_user,
            sign_in: Arc::new(SignIn::new(Arc::clone(&auth))),
            sign_out: Arc::new(SignOut::new(Arc::clone(&auth))),
            current_user_id: Arc::new(CurrentUserId::new(auth)),
            posts,
            post_medias,
            store,
        })
    }

    pub fn check_screen_name(&self) -> &CheckScreenNameExistence<SupabaseUserRepository> {
        &self.check_screen_name
    }

    pub fn create_post(
        &self,
    ) -> &CreatePost<SupabaseObjectStorage, UuidGenerator, SupabasePostRepository> {
        &self.create_post
    }

    pub fn delete_post(&self) -> &DeletePost<SupabasePostRepository, SupabasePostMediaRepository> {
        &self.delete_post
    }

    pub fn list_posts(&self) -> &ListPosts<SupabasePostRepository> {
        &self.list_posts
    }

    pub fn upload_post_media(&self) -> &UploadPostMedia<SupabaseObjectStorage, UuidGenerator> {
        &self.upload_post_media
    }

    pub fn find_suite_user(&self) -> &FindSuiteUser<SupabaseUserDetailQuery> {
        &self.find_suite_user
    }

    pub fn sign_in(&self) -> &SignIn<SupabaseAuthGateway> {
        &self.sign_in
    }

    pub fn sign_out(&self) -> &SignOut<SupabaseAuthGateway> {
        &self.sign_out
    }

    pub fn current_user_id(&self) -> &CurrentUserId<SupabaseAuthGateway> {
        &self.current_user_id
    }

    /// Post editing and lookups, exposed directly at the port.
    pub fn posts(&self) -> &SupabasePostRepository {
        &self.posts
    }

    /// Media row maintenance, exposed directly at the port.
    pub fn post_medias(&self) -> &SupabasePostMediaRepository {
        &self.post_medias
    }

    pub fn store(&self) -> &Arc<SuiteUserStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str) -> SupabaseSettings {
        SupabaseSettings {
            url: url.to_owned(),
            anon_key: "anon-key".to_owned(),
            request_timeout_seconds: Some(5),
        }
    }

    #[test]
    fn wires_the_full_graph_from_settings() {
        let app =
            App::connect(&settings("https://project.supabase.example")).expect("app wires up");
        assert!(app.current_user_id().execute().is_none());
        assert!(app.store().user_ids().is_empty());
    }

    #[test]
    fn rejects_an_unparseable_project_url() {
        let error = App::connect(&settings("not a url")).expect_err("wiring fails");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
    }
}
