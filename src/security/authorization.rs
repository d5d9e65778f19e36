//! Permission and role guards over an authenticated [`Principal`].

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;
use crate::security::principal::{Principal, Role};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Insufficient permissions. Required: {required}")]
    MissingPermission {
        required: String,
        granted: Vec<String>,
    },
    #[error("Insufficient role. Required: {}", join_roles(.allowed))]
    MissingRole { allowed: Vec<Role>, actual: Role },
}

fn join_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// A single authorization predicate chosen per route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Permission(String),
    Role(Vec<Role>),
}

impl Guard {
    pub fn require_permission(name: impl Into<String>) -> Self {
        Guard::Permission(name.into())
    }

    /// Accepts a single role or any list of roles.
    pub fn require_role(roles: impl Into<Vec<Role>>) -> Self {
        Guard::Role(roles.into())
    }

    pub fn write() -> Self {
        Self::require_permission("write")
    }

    pub fn delete() -> Self {
        Self::require_permission("delete")
    }

    pub fn moderator_or_admin() -> Self {
        Self::require_role([Role::Admin, Role::Moderator])
    }

    pub fn admin() -> Self {
        Self::require_role([Role::Admin])
    }

    pub fn check(&self, principal: Option<&Principal>) -> Result<(), AuthzError> {
        let principal = principal.ok_or(AuthzError::Unauthenticated)?;

        match self {
            Guard::Permission(name) if !principal.has_permission(name) => {
                Err(AuthzError::MissingPermission {
                    required: name.clone(),
                    granted: principal.permissions.iter().cloned().collect(),
                })
            }
            Guard::Role(allowed) if !allowed.contains(&principal.role) => {
                Err(AuthzError::MissingRole {
                    allowed: allowed.clone(),
                    actual: principal.role,
                })
            }
            _ => Ok(()),
        }
    }
}

impl From<Role> for Vec<Role> {
    fn from(role: Role) -> Self {
        vec![role]
    }
}

pub async fn authorize_middleware(
    State(guard): State<Guard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match guard.check(request.extensions().get::<Principal>()) {
        Ok(()) => next.run(request).await,
        Err(error) => {
            tracing::warn!(%error, path = %request.uri().path(), "Authorization denied");
            ApiError::from(error).into_response()
        }
    }
}
