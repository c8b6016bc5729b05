//! Per-user client cache.
//!
//! [`UserStore`] is an injected container (no process-wide global) mapping
//! user ids to [`CachedUserEntry`]. Reads return snapshots; mutators drive a
//! small per-entry state machine: Absent → Loading → Ready or Errored, with
//! Ready/Errored restartable by another fetch.
//!
//! Each entry carries a private request sequence number. A mutator takes a
//! ticket when it flips the entry to loading and its completion is applied
//! only while the ticket still matches, so a superseded request's late
//! completion is discarded: last-started wins, not last-completed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, instrument, warn};

use crate::domain::ports::{ProfileChanges, ProfileUpdater, ScreenNameUpdater, SuiteUserFinder};
use crate::domain::{Error, ScreenName, SuiteUser, UserId};

#[cfg(test)]
mod tests;

/// Read-only view of one cached user entry.
///
/// `data` and `error` can coexist: a failed update on top of a loaded user
/// keeps the stale data so callers can show it alongside the error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedUserEntry {
    pub data: Option<SuiteUser>,
    pub is_initialized: bool,
    pub is_loading: bool,
    pub error: Option<Error>,
}

#[derive(Debug, Default)]
struct EntryState {
    data: Option<SuiteUser>,
    is_initialized: bool,
    is_loading: bool,
    error: Option<Error>,
    seq: u64,
}

impl EntryState {
    fn snapshot(&self) -> CachedUserEntry {
        CachedUserEntry {
            data: self.data.clone(),
            is_initialized: self.is_initialized,
            is_loading: self.is_loading,
            error: self.error.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    user_map: HashMap<UserId, EntryState>,
    user_ids: Vec<UserId>,
}

impl StoreState {
    fn entry_mut(&mut self, user_id: UserId) -> &mut EntryState {
        self.user_map.entry(user_id).or_insert_with(|| {
            self.user_ids.push(user_id);
            EntryState::default()
        })
    }
}

/// How an in-flight request ended.
enum Completion {
    /// The backend answered; `None` means the user does not exist.
    Loaded(Option<SuiteUser>),
    /// The request failed; prior data is left untouched.
    Failed(Error),
}

/// In-memory cache of user presentation data, keyed by user id.
#[derive(Debug)]
pub struct UserStore<F, N, P> {
    finder: Arc<F>,
    name_updater: Arc<N>,
    profile_updater: Arc<P>,
    state: RwLock<StoreState>,
}

impl<F, N, P> UserStore<F, N, P> {
    pub fn new(finder: Arc<F>, name_updater: Arc<N>, profile_updater: Arc<P>) -> Self {
        Self {
            finder,
            name_updater,
            profile_updater,
            state: RwLock::new(StoreState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of one entry, if the id has ever been touched.
    pub fn snapshot(&self, user_id: &UserId) -> Option<CachedUserEntry> {
        self.read().user_map.get(user_id).map(EntryState::snapshot)
    }

    /// Every user id the store has seen, in first-seen order.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.read().user_ids.clone()
    }

    /// Flip an entry to loading without touching its data.
    ///
    /// Invalidates any outstanding request ticket for the id.
    pub fn mark_loading(&self, user_id: &UserId) {
        self.begin(user_id, false);
    }

    /// Record an error on an entry directly.
    ///
    /// Invalidates any outstanding request ticket for the id.
    pub fn mark_error(&self, user_id: &UserId, error: Error) {
        let mut state = self.write();
        let entry = state.entry_mut(*user_id);
        entry.seq += 1;
        entry.is_loading = false;
        entry.is_initialized = true;
        entry.error = Some(error);
    }

    /// Start a request: flip to loading and take the ticket that must still
    /// match for the completion to land.
    fn begin(&self, user_id: &UserId, clear_data: bool) -> u64 {
        let mut state = self.write();
        let entry = state.entry_mut(*user_id);
        entry.seq += 1;
        entry.is_loading = true;
        entry.error = None;
        if clear_data {
            entry.data = None;
        }
        entry.seq
    }

    /// Apply a completion, unless a later request has taken over the entry.
    fn finish(&self, user_id: &UserId, ticket: u64, completion: Completion) {
        let mut state = self.write();
        let entry = state.entry_mut(*user_id);
        if entry.seq != ticket {
            debug!(%user_id, "discarding stale completion");
            return;
        }
        entry.is_loading = false;
        entry.is_initialized = true;
        match completion {
            Completion::Loaded(data) => {
                entry.data = data;
                entry.error = None;
            }
            Completion::Failed(error) => {
                entry.error = Some(error);
            }
        }
    }

    /// Clone of the loaded user, or the exact precondition error the
    /// update mutators require.
    fn loaded_user(&self, user_id: &UserId) -> Result<SuiteUser, Error> {
        self.read()
            .user_map
            .get(user_id)
            .and_then(|entry| entry.data.clone())
            .ok_or_else(|| {
                Error::precondition(format!(
                    "User data for userId {user_id} not found in userMap."
                ))
            })
    }
}

impl<F: SuiteUserFinder, N: ScreenNameUpdater, P: ProfileUpdater> UserStore<F, N, P> {
    /// Load a user from the backend, replacing whatever was cached.
    ///
    /// Always reaches a terminal state: Ready with data, Ready without data
    /// when the user does not exist, or Errored.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self, user_id: &UserId) {
        let ticket = self.begin(user_id, true);
        let completion = match self.finder.find_by_user_id(user_id).await {
            Ok(found) => Completion::Loaded(found),
            Err(error) => {
                warn!(%user_id, %error, "user fetch failed");
                Completion::Failed(error)
            }
        };
        self.finish(user_id, ticket, completion);
    }

    /// Commit a screen-name change and merge it into the cached entry.
    ///
    /// Requires a loaded entry; otherwise returns the precondition error
    /// without calling the updater. A backend failure lands in the entry's
    /// `error` field (data kept) and the call still returns `Ok(())`.
    #[instrument(skip(self, screen_name))]
    pub async fn update_screen_name(
        &self,
        user_id: &UserId,
        screen_name: ScreenName,
    ) -> Result<(), Error> {
        let current = self.loaded_user(user_id)?;
        let ticket = self.begin(user_id, false);
        let completion = match self
            .name_updater
            .update_screen_name(user_id, &screen_name)
            .await
        {
            Ok(()) => Completion::Loaded(Some(current.with_screen_name(&screen_name))),
            Err(error) => {
                warn!(%user_id, %error, "screen name update failed");
                Completion::Failed(error)
            }
        };
        self.finish(user_id, ticket, completion);
        Ok(())
    }

    /// Commit profile changes and merge the stored row into the cached
    /// entry. Same precondition and failure handling as
    /// [`Self::update_screen_name`]; screen-name changes are not
    /// expressible through [`ProfileChanges`].
    #[instrument(skip(self, changes))]
    pub async fn update_user_profile(
        &self,
        user_id: &UserId,
        changes: ProfileChanges,
    ) -> Result<(), Error> {
        let current = self.loaded_user(user_id)?;
        let ticket = self.begin(user_id, false);
        let completion = match self.profile_updater.update_profile(user_id, changes).await {
            Ok(profile) => Completion::Loaded(Some(current.with_profile(&profile))),
            Err(error) => {
                warn!(%user_id, %error, "profile update failed");
                Completion::Failed(error)
            }
        };
        self.finish(user_id, ticket, completion);
        Ok(())
    }
}
