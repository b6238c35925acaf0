use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cherry_api::{ApiError, Category, NewUser, User, UserApi, UserId, UserPatch};
use cherry_store::UserStore;
use tokio::sync::{Notify, Semaphore};

/// A call received by [`ScriptedApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(UserId),
    Create(NewUser),
    Update(UserId, UserPatch),
    Delete(UserId),
}

/// Holds calls open until the test releases them
#[derive(Debug)]
pub struct Hold {
    pub entered: Notify,
    release: Semaphore,
}

impl Hold {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    /// Let `n` held calls complete
    pub fn release(&self, n: usize) {
        self.release.add_permits(n);
    }
}

/// In-memory [`UserApi`] whose server-side data and failures are scripted
/// by the test.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    server: Mutex<Vec<User>>,
    failure: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<Call>>,
    hold: Mutex<Option<Arc<Hold>>>,
    next_id: Mutex<Option<UserId>>,
}

impl ScriptedApi {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let api = Self::default();
        *api.server.lock().unwrap() = users;
        Arc::new(api)
    }

    pub fn set_server_users(&self, users: Vec<User>) {
        *self.server.lock().unwrap() = users;
    }

    /// Every following call fails with `err` until cleared
    pub fn fail_with(&self, err: Option<ApiError>) {
        *self.failure.lock().unwrap() = err;
    }

    /// The next create resolves with `id` instead of a fresh one
    pub fn assign_next_id(&self, id: UserId) {
        *self.next_id.lock().unwrap() = Some(id);
    }

    /// Every following call waits on the returned hold
    pub fn hold(&self) -> Arc<Hold> {
        let hold = Arc::new(Hold::new());
        *self.hold.lock().unwrap() = Some(hold.clone());
        hold
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    async fn enter(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        let hold = self.hold.lock().unwrap().clone();
        if let Some(hold) = hold {
            hold.entered.notify_one();
            hold.release.acquire().await.unwrap().forget();
        }
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserApi for ScriptedApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.enter(Call::List).await?;
        Ok(self.server.lock().unwrap().clone())
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        self.enter(Call::Get(id)).await?;
        self.server
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(ApiError::NotFound { id })
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.enter(Call::Create(user.clone())).await?;
        let mut server = self.server.lock().unwrap();
        let id = match self.next_id.lock().unwrap().take() {
            Some(id) => id,
            None => server.iter().map(|u| u.id).max().unwrap_or(0) + 1,
        };
        let created = User {
            id,
            ..User::from(user.clone())
        };
        match server.iter_mut().find(|u| u.id == id) {
            Some(slot) => *slot = created.clone(),
            None => server.push(created.clone()),
        }
        Ok(created)
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        self.enter(Call::Update(id, patch.clone())).await?;
        let mut server = self.server.lock().unwrap();
        let user = server
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::NotFound { id })?;
        patch.apply_to(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.enter(Call::Delete(id)).await?;
        let mut server = self.server.lock().unwrap();
        let before = server.len();
        server.retain(|u| u.id != id);
        if server.len() == before {
            return Err(ApiError::NotFound { id });
        }
        Ok(())
    }
}

pub fn user(id: UserId, name: &str, category: Category) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        category,
    }
}

pub fn three_users() -> Vec<User> {
    vec![
        user(1, "Ann", Category::User),
        user(2, "Bob", Category::Admin),
        user(3, "Cid", Category::Guest),
    ]
}

pub type TestStore = Arc<UserStore<Arc<ScriptedApi>>>;

pub fn store_for(api: &Arc<ScriptedApi>) -> TestStore {
    Arc::new(UserStore::new(api.clone()))
}

pub fn transport_failure() -> ApiError {
    ApiError::Transport("connection refused".to_string())
}
