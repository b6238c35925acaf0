//! Client-side state for the users front-end.
//!
//! [`UserStore`] is the single owner of the application state and the only
//! component that talks to the data-access layer. Pages read its observable
//! state and call its operations; they never mutate state directly.

pub mod form;
pub mod navigation;
pub mod pages;
pub mod route;
pub mod state;
pub mod store;

pub use form::{Field, FieldError, FormErrors, UserForm};
pub use navigation::Navigation;
pub use route::Route;
pub use state::UserState;
pub use store::UserStore;
