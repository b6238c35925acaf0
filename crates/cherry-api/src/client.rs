use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::ApiError,
    metrics::record_api_call,
    model::{NewUser, User, UserId, UserPatch},
};

/// The five remote operations on the users resource.
///
/// Every call is fire-once: no retries, no caching and no timeout beyond the
/// transport's own default.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /users`, in server order
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `GET /users/{id}`
    async fn get_user(&self, id: UserId) -> Result<User, ApiError>;

    /// `POST /users`, resolving with the server-assigned user
    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError>;

    /// `PATCH /users/{id}` with a partial field set
    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError>;

    /// `DELETE /users/{id}`
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: UserApi + ?Sized> UserApi for Arc<T> {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        (**self).list_users().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        (**self).get_user(id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        (**self).create_user(user).await
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        (**self).update_user(id, patch).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        (**self).delete_user(id).await
    }
}

/// [`UserApi`] over HTTP against a single base resource URL.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Client,
    base_url: String,
}

impl HttpUserApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (proxies, headers, ...)
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, "Creating users API client");
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, id: UserId) -> String {
        format!("{}/{id}", self.base_url)
    }

    /// Send the request and turn non-success statuses into [`ApiError`]s.
    async fn execute(
        &self,
        request: RequestBuilder,
        id: Option<UserId>,
    ) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, body, id))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        id: Option<UserId>,
    ) -> Result<T, ApiError> {
        debug!(operation, ?id, "Issuing users API request");
        let result = match self.execute(request, id).await {
            Ok(response) => response.json::<T>().await.map_err(ApiError::from),
            Err(err) => Err(err),
        };
        finish(operation, result)
    }
}

fn finish<T>(operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(err) = &result {
        warn!(operation, error = %err, "Users API request failed");
    }
    record_api_call(operation, &result);
    result
}

/// Map a non-success status onto the error taxonomy. A 404 only means
/// "not found" when the path addressed a single user.
fn error_for_status(status: StatusCode, body: String, id: Option<UserId>) -> ApiError {
    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => ApiError::NotFound { id },
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            if body.is_empty() {
                ApiError::Validation(status.to_string())
            } else {
                ApiError::Validation(body)
            }
        }
        _ if body.is_empty() => {
            ApiError::Transport(format!("request failed with status {status}"))
        }
        _ => ApiError::Transport(format!("request failed with status {status}: {body}")),
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.client.get(&self.base_url);
        self.fetch("list", request, None).await
    }

    async fn get_user(&self, id: UserId) -> Result<User, ApiError> {
        let request = self.client.get(self.resource_url(id));
        self.fetch("get", request, Some(id)).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let request = self.client.post(&self.base_url).json(user);
        self.fetch("create", request, None).await
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> Result<User, ApiError> {
        let request = self.client.patch(self.resource_url(id)).json(patch);
        self.fetch("update", request, Some(id)).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        debug!(operation = "delete", id, "Issuing users API request");
        let request = self.client.delete(self.resource_url(id));
        let result = self.execute(request, Some(id)).await.map(|_| ());
        finish("delete", result)
    }
}
