use cherry_api::{User, UserApi};

use crate::{state::UserState, store::UserStore};

/// The list page. Entering it triggers the one-time user load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsersPage;

impl UsersPage {
    pub async fn enter<A: UserApi>(store: &UserStore<A>) -> Self {
        store.load_users().await;
        Self
    }

    pub fn rows(state: &UserState) -> &[User] {
        &state.users
    }
}
