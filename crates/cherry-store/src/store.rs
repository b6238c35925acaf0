use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use cherry_api::{ApiError, NewUser, User, UserApi, UserId, UserPatch};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::state::UserState;

/// One gate per operation: two calls of the same operation never overlap,
/// different operations interleave freely.
#[derive(Debug, Default)]
struct Gates {
    load_users: Mutex<()>,
    load_one_user: Mutex<()>,
    update_user: Mutex<()>,
    create_user: Mutex<()>,
    delete_user: Mutex<()>,
}

/// Single source of truth for user data and request status.
///
/// State is published through a [`watch`] channel: [`UserStore::subscribe`]
/// hands out receivers that observe every change, [`UserStore::snapshot`]
/// clones the current value. Every operation follows the same shape: mark a
/// call in flight, await the data-access call, then apply one patch that also
/// settles the call. No state lock is held across an await point.
///
/// Failures never leave an operation; they are stored as text in
/// [`UserState::error`].
#[derive(Debug)]
pub struct UserStore<A> {
    api: A,
    state: watch::Sender<UserState>,
    in_flight: AtomicUsize,
    gates: Gates,
}

impl<A: UserApi> UserStore<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(UserState::default());
        Self {
            api,
            state,
            in_flight: AtomicUsize::new(0),
            gates: Gates::default(),
        }
    }

    /// Load the user list once.
    ///
    /// Does nothing while the list is non-empty. The error field is only
    /// cleared when a call is actually issued.
    pub async fn load_users(&self) {
        let _gate = self.gates.load_users.lock().await;
        if self.has_users() {
            debug!("Users already loaded, skipping fetch");
            return;
        }

        let pending = self.begin("load_users");
        let result = self.api.list_users().await;
        pending.settle(|state| match result {
            Ok(users) => {
                info!(count = users.len(), "Loaded users");
                state.users = dedupe_by_id(users);
            }
            Err(err) => fail(state, "load_users", &err),
        });
    }

    /// Fetch one user into `selected_user`. Always calls the server.
    pub async fn load_one_user(&self, id: UserId) {
        let _gate = self.gates.load_one_user.lock().await;

        let pending = self.begin("load_one_user");
        let result = self.api.get_user(id).await;
        pending.settle(|state| match result {
            Ok(user) => {
                debug!(id, "Loaded user");
                state.selected_user = Some(user);
            }
            Err(err) => fail(state, "load_one_user", &err),
        });
    }

    /// Send every field of `user` to the server and replace the matching
    /// list element in place with the server's copy.
    ///
    /// A user that is not in the loaded list stays out of it even though the
    /// server accepted the update.
    pub async fn update_user(&self, user: User) {
        let _gate = self.gates.update_user.lock().await;

        let pending = self.begin("update_user");
        let result = self.api.update_user(user.id, &UserPatch::from(&user)).await;
        pending.settle(|state| match result {
            Ok(updated) => {
                if let Some(selected) = state
                    .selected_user
                    .as_mut()
                    .filter(|selected| selected.id == updated.id)
                {
                    selected.clone_from(&updated);
                }
                match state.users.iter_mut().find(|u| u.id == updated.id) {
                    Some(slot) => *slot = updated,
                    None => debug!(id = updated.id, "Updated user is not in the loaded list"),
                }
            }
            Err(err) => fail(state, "update_user", &err),
        });
    }

    /// Create a user and return the server's copy.
    ///
    /// The new user is added to an already loaded list; an empty list is
    /// left alone so the next [`load_users`](Self::load_users) fetches the
    /// full collection.
    pub async fn create_user(&self, user: NewUser) -> Option<User> {
        let _gate = self.gates.create_user.lock().await;

        let pending = self.begin("create_user");
        let result = self.api.create_user(&user).await;
        let created = result.as_ref().ok().cloned();
        pending.settle(|state| match result {
            Ok(created) => {
                info!(id = created.id, "Created user");
                if !state.has_users() {
                    return;
                }
                match state.users.iter_mut().find(|u| u.id == created.id) {
                    Some(slot) => *slot = created,
                    None => state.users.push(created),
                }
            }
            Err(err) => fail(state, "create_user", &err),
        });
        created
    }

    /// Delete a user and drop it from the list and the selection.
    pub async fn delete_user(&self, id: UserId) {
        let _gate = self.gates.delete_user.lock().await;

        let pending = self.begin("delete_user");
        let result = self.api.delete_user(id).await;
        pending.settle(|state| match result {
            Ok(()) => {
                info!(id, "Deleted user");
                state.users.retain(|u| u.id != id);
                if state.selected_user.as_ref().is_some_and(|u| u.id == id) {
                    state.selected_user = None;
                }
            }
            Err(err) => fail(state, "delete_user", &err),
        });
    }
}

impl<A> UserStore<A> {
    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<UserState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> UserState {
        self.state.borrow().clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.state.borrow().users.clone()
    }

    pub fn selected_user(&self) -> Option<User> {
        self.state.borrow().selected_user.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn user_count(&self) -> usize {
        self.state.borrow().user_count()
    }

    pub fn has_users(&self) -> bool {
        self.state.borrow().has_users()
    }

    fn begin(&self, operation: &'static str) -> Pending<'_, A> {
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
            state.error = None;
        });
        debug!(operation, "Store call issued");
        Pending {
            store: self,
            settled: false,
        }
    }

    /// Runs under the channel's write lock, so the counter and the flag move
    /// together.
    fn release(&self, state: &mut UserState) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            state.loading = false;
        }
    }
}

/// An outstanding call. Settling applies the result patch and clears the
/// in-flight mark in one update; dropping an unsettled call (a cancelled
/// future) still clears the mark.
struct Pending<'a, A> {
    store: &'a UserStore<A>,
    settled: bool,
}

impl<A> Pending<'_, A> {
    fn settle(mut self, patch: impl FnOnce(&mut UserState)) {
        self.settled = true;
        let store = self.store;
        store.state.send_modify(|state| {
            patch(state);
            store.release(state);
        });
    }
}

impl<A> Drop for Pending<'_, A> {
    fn drop(&mut self) {
        if !self.settled {
            let store = self.store;
            store.state.send_modify(|state| store.release(state));
        }
    }
}

fn fail(state: &mut UserState, operation: &'static str, err: &ApiError) {
    warn!(operation, error = %err, "Store call failed");
    state.error = Some(err.to_string());
}

/// Keep the first occurrence of each id
fn dedupe_by_id(users: Vec<User>) -> Vec<User> {
    let total = users.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<User> = users.into_iter().filter(|u| seen.insert(u.id)).collect();
    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "Server returned duplicate user ids"
        );
    }
    unique
}
