use cherry_api::UserApi;

use crate::{form::UserForm, pages::SubmitOutcome, route::Route, store::UserStore};

/// The creation page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCreator {
    form: UserForm,
}

impl UserCreator {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn form(&self) -> &UserForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut UserForm {
        &mut self.form
    }

    pub async fn submit<A: UserApi>(&mut self, store: &UserStore<A>) -> SubmitOutcome {
        let new_user = match self.form.to_new_user() {
            Ok(new_user) => new_user,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        store.create_user(new_user).await;
        match store.error() {
            Some(error) => SubmitOutcome::Failed(error),
            None => SubmitOutcome::Navigate(Route::Users),
        }
    }

    pub const fn cancel() -> Route {
        Route::Users
    }
}
