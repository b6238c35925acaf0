use cherry_api::User;

/// Snapshot of everything the pages render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// Users in server order; empty until the first successful load
    pub users: Vec<User>,
    /// True while a call issued by the store is outstanding
    pub loading: bool,
    /// Set by a single-user load, read by the editor
    pub selected_user: Option<User>,
    /// Message of the last failure
    pub error: Option<String>,
}

impl UserState {
    pub const fn user_count(&self) -> usize {
        self.users.len()
    }

    pub const fn has_users(&self) -> bool {
        !self.users.is_empty()
    }
}
