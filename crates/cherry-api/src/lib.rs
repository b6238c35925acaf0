//! Data model and HTTP data-access layer for the users resource.

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod tracing;

pub use client::{HttpUserApi, UserApi};
pub use config::{ApiConfig, Environment};
pub use error::ApiError;
pub use model::{Category, NewUser, User, UserId, UserPatch};
