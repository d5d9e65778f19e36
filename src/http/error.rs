//! Structured JSON error responses.
//!
//! Every failure path in the service ends here. Bodies always carry
//! `{error, message}` plus whatever context the failure has.

use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::catalog::CatalogError;
use crate::security::auth::{AuthError, AuthScheme};
use crate::security::authorization::AuthzError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest {
        message: String,
        example: Option<&'static str>,
    },

    #[error("Request body contains invalid data")]
    Validation(Vec<String>),

    #[error("{error}")]
    Unauthorized { error: AuthError, scheme: AuthScheme },

    #[error(transparent)]
    Authorization(#[from] AuthzError),

    #[error("{0}")]
    NotFound(String),

    #[error("Request body is too large")]
    PayloadTooLarge,

    #[error("{message}")]
    RateLimited { message: String, retry_after: u64 },

    #[error("{message}: {details}")]
    Internal {
        message: &'static str,
        details: String,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            example: None,
        }
    }

    /// Wraps an unexpected failure inside a handler.
    pub fn internal(message: &'static str, cause: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message,
            details: cause.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Authorization(AuthzError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            ApiError::Authorization(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::BadRequest { message, example } => {
                let mut body = json!({ "error": "Bad Request", "message": message });
                if let Some(example) = example {
                    body["example"] = json!(example);
                }
                body
            }
            ApiError::Validation(details) => json!({
                "error": "Validation failed",
                "message": self.to_string(),
                "details": details,
            }),
            ApiError::Unauthorized { error, scheme } => {
                let mut body = json!({
                    "error": "Unauthorized",
                    "message": auth_message(error, *scheme),
                });
                if let Some(hint) = auth_hint(error, *scheme) {
                    body["hint"] = json!(hint);
                }
                body
            }
            ApiError::Authorization(error) => match error {
                AuthzError::Unauthenticated => json!({
                    "error": "Unauthorized",
                    "message": error.to_string(),
                }),
                AuthzError::MissingPermission { granted, .. } => json!({
                    "error": "Forbidden",
                    "message": error.to_string(),
                    "userPermissions": granted,
                }),
                AuthzError::MissingRole { actual, .. } => json!({
                    "error": "Forbidden",
                    "message": error.to_string(),
                    "userRole": actual,
                }),
            },
            ApiError::NotFound(message) => json!({ "error": "Not Found", "message": message }),
            ApiError::PayloadTooLarge => json!({
                "error": "Payload Too Large",
                "message": self.to_string(),
            }),
            ApiError::RateLimited {
                message,
                retry_after,
            } => json!({
                "error": "Rate limit exceeded",
                "message": message,
                "retryAfter": retry_after,
            }),
            ApiError::Internal { message, details } => json!({
                "error": "Internal Server Error",
                "message": message,
                "details": details,
            }),
        }
    }
}

fn auth_message(error: &AuthError, scheme: AuthScheme) -> String {
    match (error, scheme) {
        (AuthError::InvalidCredential, AuthScheme::ApiKey) => "Invalid API key".to_string(),
        (AuthError::InvalidCredential, AuthScheme::Token) => "Invalid token".to_string(),
        _ => error.to_string(),
    }
}

fn auth_hint(error: &AuthError, scheme: AuthScheme) -> Option<&'static str> {
    if scheme != AuthScheme::ApiKey {
        return None;
    }
    match error {
        AuthError::MissingHeader => {
            Some(r#"Include "Authorization: Bearer your-api-key" in your request headers"#)
        }
        AuthError::MalformedHeader => Some(r#"Use "Authorization: Bearer your-api-key" format"#),
        AuthError::InvalidCredential => Some("Please check your API key and try again"),
        AuthError::MalformedToken | AuthError::UnknownUser => None,
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::InvalidArgument => ApiError::BadRequest {
                message: error.to_string(),
                example: Some(crate::drinks::handlers::SEARCH_EXAMPLE),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut response = (status, Json(self.body())).into_response();
        if let ApiError::RateLimited { retry_after, .. } = self {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
        }
        response
    }
}
