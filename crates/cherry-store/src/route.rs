use std::{fmt, str::FromStr};

use cherry_api::UserId;
use thiserror::Error;

/// Pages reachable in the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/users`
    Users,
    /// `/users/create`
    UserCreate,
    /// `/users/edit/:id`
    UserEdit(UserId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no page at '{0}'")]
    NotFound(String),
}

/// Parse a routed record id. Absent or malformed ids become 0.
pub fn parse_id(raw: Option<&str>) -> UserId {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["users"] => Ok(Self::Users),
            ["users", "create"] => Ok(Self::UserCreate),
            ["users", "edit"] => Ok(Self::UserEdit(parse_id(None))),
            ["users", "edit", id] => Ok(Self::UserEdit(parse_id(Some(*id)))),
            _ => Err(RouteError::NotFound(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("/"),
            Self::Users => f.write_str("/users"),
            Self::UserCreate => f.write_str("/users/create"),
            Self::UserEdit(id) => write!(f, "/users/edit/{id}"),
        }
    }
}
