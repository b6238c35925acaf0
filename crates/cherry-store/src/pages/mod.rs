//! Page models: what each page reads from the store and which store
//! operations its lifecycle events and actions trigger.

pub mod creator;
pub mod editor;
pub mod users;

use std::sync::Arc;

use cherry_api::UserApi;
use tracing::debug;

pub use creator::UserCreator;
pub use editor::UserEditor;
pub use users::UsersPage;

use crate::{form::FormErrors, navigation::Navigation, route::Route, store::UserStore};

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid(FormErrors),
    /// The store reported an error; stay on the page
    Failed(String),
    /// Saved; leave for the given page
    Navigate(Route),
}

/// The page currently mounted
#[derive(Debug, Clone)]
pub enum Page {
    Home,
    Users(UsersPage),
    Create(UserCreator),
    Edit(UserEditor),
}

/// Mounts pages for routes and runs their lifecycle against a shared store.
#[derive(Debug)]
pub struct App<A> {
    store: Arc<UserStore<A>>,
    navigation: Navigation,
    route: Route,
    page: Page,
}

impl<A: UserApi> App<A> {
    /// Start on the landing page. The user list is loaded up front.
    pub async fn start(store: Arc<UserStore<A>>) -> Self {
        store.load_users().await;
        Self {
            store,
            navigation: Navigation::default(),
            route: Route::Home,
            page: Page::Home,
        }
    }

    pub fn store(&self) -> &UserStore<A> {
        &self.store
    }

    pub const fn route(&self) -> Route {
        self.route
    }

    pub const fn page(&self) -> &Page {
        &self.page
    }

    pub const fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub const fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    /// Unmount the current page and mount the one for `route`.
    pub async fn navigate(&mut self, route: Route) {
        debug!(%route, "Navigating");
        let route = self.navigation.follow(route);
        self.page = match route {
            Route::Home => Page::Home,
            Route::Users => Page::Users(UsersPage::enter(&self.store).await),
            Route::UserCreate => Page::Create(UserCreator::new()),
            Route::UserEdit(id) => {
                let mut editor = UserEditor::new();
                editor.set_id(id, &self.store).await;
                Page::Edit(editor)
            }
        };
        self.route = route;
    }

    /// Submit the mounted form, following the navigation it asks for.
    /// Returns `None` when the page has no form.
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let outcome = match &mut self.page {
            Page::Create(creator) => creator.submit(&self.store).await,
            Page::Edit(editor) => editor.submit(&self.store).await,
            Page::Home | Page::Users(_) => return None,
        };
        if let SubmitOutcome::Navigate(route) = &outcome {
            self.navigate(*route).await;
        }
        Some(outcome)
    }

    /// Leave the mounted form without saving
    pub async fn cancel(&mut self) {
        let target = match &self.page {
            Page::Create(_) => UserCreator::cancel(),
            Page::Edit(_) => UserEditor::cancel(),
            Page::Home | Page::Users(_) => return,
        };
        self.navigate(target).await;
    }
}
