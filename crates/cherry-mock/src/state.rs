use std::sync::{Arc, PoisonError, RwLock};

use cherry_api::{Category, NewUser, User, UserId, UserPatch};

use crate::error::MockError;

#[derive(Debug, Default)]
struct UserTable {
    users: Vec<User>,
    last_id: UserId,
}

/// Shared in-memory users collection. Insertion order is the list order.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    table: Arc<RwLock<UserTable>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-populated with [`sample_users`].
    pub fn seeded() -> Self {
        Self::with_users(sample_users())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let last_id = users.iter().map(|u| u.id).max().unwrap_or(0);
        Self {
            table: Arc::new(RwLock::new(UserTable { users, last_id })),
        }
    }

    pub fn list(&self) -> Vec<User> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table.users.clone()
    }

    pub fn get(&self, id: UserId) -> Result<User, MockError> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(MockError::NotFound(id))
    }

    pub fn insert(&self, new: NewUser) -> User {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        table.last_id += 1;
        let user = User {
            id: table.last_id,
            ..User::from(new)
        };
        table.users.push(user.clone());
        user
    }

    pub fn patch(&self, id: UserId, patch: &UserPatch) -> Result<User, MockError> {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        let user = table
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(MockError::NotFound(id))?;
        patch.apply_to(user);
        Ok(user.clone())
    }

    pub fn remove(&self, id: UserId) -> Result<(), MockError> {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        let position = table
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(MockError::NotFound(id))?;
        table.users.remove(position);
        Ok(())
    }
}

fn sample(id: UserId, name: &str, email: &str, category: Category) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        category,
    }
}

/// Sample users for local development
pub fn sample_users() -> Vec<User> {
    vec![
        sample(1, "John Doe", "john.doe@example.com", Category::Admin),
        sample(2, "Jane Smith", "jane.smith@example.com", Category::User),
        sample(3, "Bob Wilson", "bob.wilson@example.com", Category::User),
        sample(4, "Alice Johnson", "alice.johnson@example.com", Category::Guest),
        sample(5, "Charlie Brown", "charlie.brown@example.com", Category::Guest),
    ]
}
