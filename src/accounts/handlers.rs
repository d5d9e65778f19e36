use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::security::auth::{AuthError, AuthScheme};
use crate::security::principal::{IssuedCredentials, Principal};

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CredentialsResponse {
    pub success: bool,
    pub data: IssuedCredentials,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub data: Vec<Principal>,
    pub total: usize,
}

/// `POST /auth/token`: mock login by username, no password.
pub async fn issue_token(
    State(state): State<AppState>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<CredentialsResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let username = request
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("username is required"))?;

    let credentials = state.registry.credentials_for(username).ok_or_else(|| {
        tracing::warn!(username, "Token requested for unknown user");
        ApiError::Unauthorized {
            error: AuthError::UnknownUser,
            scheme: AuthScheme::Token,
        }
    })?;

    tracing::info!(username, "Issued mock credentials");
    Ok(Json(CredentialsResponse {
        success: true,
        data: credentials,
    }))
}

/// `GET /auth/users`
pub async fn list_users(State(state): State<AppState>) -> Json<UsersResponse> {
    let data: Vec<Principal> = state.registry.principals().into_iter().cloned().collect();
    Json(UsersResponse {
        success: true,
        total: data.len(),
        data,
    })
}
