use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;

use super::*;
use crate::domain::ports::{
    MockProfileUpdater, MockScreenNameUpdater, MockSuiteUserFinder, ProfileChanges,
};
use crate::domain::user::{DisplayNameText, UserDetail, UserProfile};
use crate::domain::{ErrorCode, FieldUpdate};

type TestStore = UserStore<MockSuiteUserFinder, MockScreenNameUpdater, MockProfileUpdater>;

fn suite_user(user_id: UserId, screen_name: &str) -> SuiteUser {
    let now = Utc::now();
    SuiteUser::new(UserDetail {
        user_id,
        screen_name: screen_name.to_owned(),
        display_name: Some("Ada".to_owned()),
        avatar_url: None,
        self_introduction: None,
        created_at: now,
        updated_at: now,
    })
}

fn profile_row(user_id: UserId, display_name: &str) -> UserProfile {
    let now = Utc::now();
    UserProfile {
        user_id,
        display_name: Some(display_name.to_owned()),
        avatar_url: Some("https://cdn.example/avatar".to_owned()),
        self_introduction: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn store(
    finder: MockSuiteUserFinder,
    name_updater: MockScreenNameUpdater,
    profile_updater: MockProfileUpdater,
) -> TestStore {
    UserStore::new(
        Arc::new(finder),
        Arc::new(name_updater),
        Arc::new(profile_updater),
    )
}

fn store_with_finder(finder: MockSuiteUserFinder) -> TestStore {
    store(
        finder,
        MockScreenNameUpdater::new(),
        MockProfileUpdater::new(),
    )
}

#[test]
fn untouched_ids_have_no_snapshot() {
    let store = store_with_finder(MockSuiteUserFinder::new());
    assert!(store.snapshot(&UserId::random()).is_none());
    assert!(store.user_ids().is_empty());
}

#[tokio::test]
async fn fetch_user_success_reaches_ready() {
    let user_id = UserId::random();
    let loaded = suite_user(user_id, "ada_l");
    let expected = loaded.clone();
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .with(eq(user_id))
        .times(1)
        .return_once(move |_| Ok(Some(loaded)));

    let store = store_with_finder(finder);
    store.fetch_user(&user_id).await;

    let entry = store.snapshot(&user_id).expect("entry exists");
    assert!(entry.is_initialized);
    assert!(!entry.is_loading);
    assert_eq!(entry.data, Some(expected));
    assert!(entry.error.is_none());
    assert_eq!(store.user_ids(), vec![user_id]);
}

#[tokio::test]
async fn fetch_user_for_missing_user_still_terminates() {
    let user_id = UserId::random();
    let mut finder = MockSuiteUserFinder::new();
    finder.expect_find_by_user_id().return_once(|_| Ok(None));

    let store = store_with_finder(finder);
    store.fetch_user(&user_id).await;

    let entry = store.snapshot(&user_id).expect("entry exists");
    assert!(entry.is_initialized);
    assert!(!entry.is_loading);
    assert!(entry.data.is_none());
    assert!(entry.error.is_none());
}

#[tokio::test]
async fn fetch_user_failure_clears_data_and_records_the_error() {
    let user_id = UserId::random();
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .return_once(|_| Ok(Some(suite_user(UserId::random(), "ada_l"))));
    let store = store_with_finder(finder);
    store.fetch_user(&user_id).await;

    // Refetch fails: prior data was cleared when the fetch started.
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .return_once(|_| Err(Error::backend("status 500")));
    let store2 = store_with_finder(finder);
    store2.fetch_user(&user_id).await;

    let entry = store2.snapshot(&user_id).expect("entry exists");
    assert!(entry.data.is_none());
    assert!(!entry.is_loading);
    assert_eq!(
        entry.error.as_ref().map(Error::code),
        Some(ErrorCode::Backend)
    );
}

#[test]
fn mark_loading_preserves_data() {
    let store = store_with_finder(MockSuiteUserFinder::new());
    let user_id = UserId::random();
    let loaded = suite_user(user_id, "ada_l");
    let ticket = store.begin(&user_id, false);
    store.finish(&user_id, ticket, Completion::Loaded(Some(loaded.clone())));

    store.mark_loading(&user_id);

    let entry = store.snapshot(&user_id).expect("entry exists");
    assert!(entry.is_loading);
    assert_eq!(entry.data, Some(loaded));
}

#[test]
fn stale_completion_is_discarded() {
    let store = store_with_finder(MockSuiteUserFinder::new());
    let user_id = UserId::random();

    let first = store.begin(&user_id, true);
    // A second request starts before the first completes.
    let second = store.begin(&user_id, true);

    let slow = suite_user(user_id, "slow_one");
    store.finish(&user_id, first, Completion::Loaded(Some(slow)));
    let entry = store.snapshot(&user_id).expect("entry exists");
    assert!(entry.is_loading, "superseded completion must not land");
    assert!(entry.data.is_none());

    let fast = suite_user(user_id, "fast_one");
    store.finish(&user_id, second, Completion::Loaded(Some(fast.clone())));
    let entry = store.snapshot(&user_id).expect("entry exists");
    assert!(!entry.is_loading);
    assert_eq!(entry.data, Some(fast));
}

#[tokio::test]
async fn update_screen_name_requires_loaded_data() {
    let user_id = UserId::random();
    let mut name_updater = MockScreenNameUpdater::new();
    name_updater.expect_update_screen_name().times(0);
    let store = store(
        MockSuiteUserFinder::new(),
        name_updater,
        MockProfileUpdater::new(),
    );

    let name = ScreenName::new("new_name").expect("valid name");
    let err = store
        .update_screen_name(&user_id, name)
        .await
        .expect_err("precondition fails");
    assert_eq!(err.code(), ErrorCode::Precondition);
    assert_eq!(
        err.message(),
        format!("User data for userId {user_id} not found in userMap.")
    );
}

#[tokio::test]
async fn update_screen_name_merges_into_the_cached_entry() {
    let user_id = UserId::random();
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .return_once(move |_| Ok(Some(suite_user(user_id, "old_name"))));
    let mut name_updater = MockScreenNameUpdater::new();
    name_updater
        .expect_update_screen_name()
        .withf(move |id, name| *id == user_id && name.as_ref() == "new_name")
        .times(1)
        .return_once(|_, _| Ok(()));

    let store = store(finder, name_updater, MockProfileUpdater::new());
    store.fetch_user(&user_id).await;

    let name = ScreenName::new("new_name").expect("valid name");
    store
        .update_screen_name(&user_id, name)
        .await
        .expect("precondition holds");

    let entry = store.snapshot(&user_id).expect("entry exists");
    let data = entry.data.expect("data kept");
    assert_eq!(data.screen_name(), "new_name");
    assert!(entry.error.is_none());
    assert!(!entry.is_loading);
}

#[tokio::test]
async fn recommitting_the_current_screen_name_leaves_data_unchanged() {
    let user_id = UserId::random();
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .return_once(move |_| Ok(Some(suite_user(user_id, "ada_l"))));
    let mut name_updater = MockScreenNameUpdater::new();
    name_updater
        .expect_update_screen_name()
        .withf(move |id, name| *id == user_id && name.as_ref() == "ada_l")
        .times(1)
        .return_once(|_, _| Ok(()));

    let store = store(finder, name_updater, MockProfileUpdater::new());
    store.fetch_user(&user_id).await;
    let before = store.snapshot(&user_id).expect("entry exists");

    let name = ScreenName::new("ada_l").expect("valid name");
    store
        .update_screen_name(&user_id, name)
        .await
        .expect("precondition holds");

    let after = store.snapshot(&user_id).expect("entry exists");
    assert_eq!(after.data, before.data);
    assert!(!after.is_loading);
    assert!(after.error.is_none());
}

#[tokio::test]
async fn failed_update_keeps_stale_data_and_records_the_error() {
    let user_id = UserId::random();
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .return_once(move |_| Ok(Some(suite_user(user_id, "old_name"))));
    let mut name_updater = MockScreenNameUpdater::new();
    name_updater
        .expect_update_screen_name()
        .return_once(|_, _| Err(Error::backend("duplicate key")));

    let store = store(finder, name_updater, MockProfileUpdater::new());
    store.fetch_user(&user_id).await;

    let name = ScreenName::new("new_name").expect("valid name");
    store
        .update_screen_name(&user_id, name)
        .await
        .expect("backend failures land in the entry");

    let entry = store.snapshot(&user_id).expect("entry exists");
    let data = entry.data.expect("stale data kept");
    assert_eq!(data.screen_name(), "old_name");
    assert_eq!(
        entry.error.as_ref().map(Error::code),
        Some(ErrorCode::Backend)
    );
    assert!(!entry.is_loading);
}

#[tokio::test]
async fn update_user_profile_merges_the_stored_row() {
    let user_id = UserId::random();
    let mut finder = MockSuiteUserFinder::new();
    finder
        .expect_find_by_user_id()
        .return_once(move |_| Ok(Some(suite_user(user_id, "ada_l"))));
    let mut profile_updater = MockProfileUpdater::new();
    profile_updater
        .expect_update_profile()
        .withf(move |id, changes| {
            *id == user_id
                && matches!(&changes.display_name, FieldUpdate::Set(name) if name.as_ref() == "Countess")
        })
        .times(1)
        .return_once(move |_, _| Ok(profile_row(user_id, "Countess")));

    let store = store(finder, MockScreenNameUpdater::new(), profile_updater);
    store.fetch_user(&user_id).await;

    let changes = ProfileChanges {
        display_name: FieldUpdate::Set(DisplayNameText::new("Countess").expect("valid name")),
        ..ProfileChanges::default()
    };
    store
        .update_user_profile(&user_id, changes)
        .await
        .expect("precondition holds");

    let entry = store.snapshot(&user_id).expect("entry exists");
    let data = entry.data.expect("data kept");
    assert_eq!(data.display_name(), Some("Countess"));
    assert_eq!(data.screen_name(), "ada_l");
}

#[tokio::test]
async fn update_user_profile_requires_loaded_data() {
    let user_id = UserId::random();
    let mut profile_updater = MockProfileUpdater::new();
    profile_updater.expect_update_profile().times(0);
    let store = store(
        MockSuiteUserFinder::new(),
        MockScreenNameUpdater::new(),
        profile_updater,
    );

    let err = store
        .update_user_profile(&user_id, ProfileChanges::default())
        .await
        .expect_err("precondition fails");
    assert_eq!(err.code(), ErrorCode::Precondition);
}

#[test]
fn mark_error_terminates_the_entry() {
    let store = store_with_finder(MockSuiteUserFinder::new());
    let user_id = UserId::random();
    store.mark_loading(&user_id);
    store.mark_error(&user_id, Error::backend("status 500"));

    let entry = store.snapshot(&user_id).expect("entry exists");
    assert!(!entry.is_loading);
    assert!(entry.is_initialized);
    assert!(entry.error.is_some());
}
