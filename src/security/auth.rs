//! Bearer authentication.
//!
//! Two mocked schemes share the `Authorization: Bearer <credential>` header:
//! a verbatim API-key lookup and a `mock-jwt-<principal id>` token. Neither
//! verifies a signature or an expiry; both are allowlists over the registry.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;
use crate::observability::metrics;
use crate::security::principal::{Principal, PrincipalRegistry};

/// Prefix identifying a mock token.
pub const TOKEN_PREFIX: &str = "mock-jwt-";

/// Which credential scheme a route accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    ApiKey,
    Token,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is required")]
    MissingHeader,
    #[error("Invalid authorization format")]
    MalformedHeader,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("Invalid token format")]
    MalformedToken,
    #[error("Unknown user")]
    UnknownUser,
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "missing_header",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::MalformedToken => "malformed_token",
            AuthError::UnknownUser => "unknown_user",
        }
    }
}

/// Resolves a bearer credential to a principal under one scheme.
#[derive(Debug, Clone)]
pub struct Authenticator {
    registry: Arc<PrincipalRegistry>,
    scheme: AuthScheme,
}

impl Authenticator {
    pub fn new(registry: Arc<PrincipalRegistry>, scheme: AuthScheme) -> Self {
        Self { registry, scheme }
    }

    pub fn api_key(registry: Arc<PrincipalRegistry>) -> Self {
        Self::new(registry, AuthScheme::ApiKey)
    }

    pub fn token(registry: Arc<PrincipalRegistry>) -> Self {
        Self::new(registry, AuthScheme::Token)
    }

    pub fn authenticate(&self, header: Option<&str>) -> Result<Principal, AuthError> {
        let header = header.ok_or(AuthError::MissingHeader)?;

        let mut parts = header.split(' ');
        let credential = match (parts.next(), parts.next()) {
            (Some("Bearer"), Some(credential)) if !credential.is_empty() => credential,
            _ => return Err(AuthError::MalformedHeader),
        };

        let principal = match self.scheme {
            AuthScheme::ApiKey => self.registry.find_by_api_key(credential),
            AuthScheme::Token => {
                let id = credential
                    .strip_prefix(TOKEN_PREFIX)
                    .ok_or(AuthError::MalformedToken)?;
                self.registry.find_by_id(id)
            }
        };

        principal.cloned().ok_or(AuthError::InvalidCredential)
    }
}

/// Authenticates the request and attaches the [`Principal`] as an extension.
pub async fn authenticate_middleware(
    State(auth): State<Authenticator>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    match auth.authenticate(header) {
        Ok(principal) => {
            tracing::debug!(user = %principal.username, role = %principal.role, "Authenticated");
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(error) => {
            tracing::warn!(reason = error.reason(), path = %request.uri().path(), "Authentication failed");
            metrics::record_auth_failure(error.reason());
            ApiError::Unauthorized {
                error,
                scheme: auth.scheme,
            }
            .into_response()
        }
    }
}
