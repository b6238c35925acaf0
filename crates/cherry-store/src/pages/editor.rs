use cherry_api::{User, UserApi, UserId};
use tracing::warn;

use crate::{form::UserForm, pages::SubmitOutcome, route::Route, store::UserStore};

/// The editor page.
///
/// The working copy is derived from the store's selected user, or from an
/// empty guest user when nothing is selected. It is re-derived only when the
/// selected user's identity changes, so in-progress edits survive refreshes
/// of the same user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserEditor {
    id: UserId,
    derived_from: Option<UserId>,
    working_id: UserId,
    form: UserForm,
}

impl UserEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The routed record id
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Id of the user the working copy belongs to, 0 when empty
    pub const fn working_id(&self) -> UserId {
        self.working_id
    }

    pub const fn form(&self) -> &UserForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    /// Make `id` current. A changed non-zero id loads that user.
    pub async fn set_id<A: UserApi>(&mut self, id: UserId, store: &UserStore<A>) {
        if id != self.id {
            self.id = id;
            if id != 0 {
                store.load_one_user(id).await;
            }
        }
        self.sync(store.selected_user().as_ref());
    }

    /// Re-derive the working copy if the selected user's identity changed.
    pub fn sync(&mut self, selected: Option<&User>) {
        let identity = selected.map(|u| u.id);
        if identity == self.derived_from {
            return;
        }

        let source = selected.cloned().unwrap_or_default();
        self.form = UserForm::from(&source);
        self.working_id = source.id;
        self.derived_from = identity;
    }

    /// Validate and send the working copy. A working copy that belongs to a
    /// different user than the routed one is never sent.
    pub async fn submit<A: UserApi>(&mut self, store: &UserStore<A>) -> SubmitOutcome {
        if self.working_id != self.id {
            warn!(
                id = self.id,
                working_id = self.working_id,
                "Editor form does not belong to the routed user"
            );
            return SubmitOutcome::Failed(format!("user {} is not loaded", self.id));
        }

        let user = match self.form.to_user(self.working_id) {
            Ok(user) => user,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        store.update_user(user).await;
        match store.error() {
            Some(error) => SubmitOutcome::Failed(error),
            None => SubmitOutcome::Navigate(Route::Users),
        }
    }

    /// Discard edits and go back to the list
    pub const fn cancel() -> Route {
        Route::Users
    }
}
