//! Mock account endpoints.
//!
//! `POST /auth/token` hands out the credentials a configured user would
//! present; `GET /auth/users` lists principals for staff. Neither touches
//! real identity infrastructure.

pub mod handlers;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

use crate::http::server::AppState;
use crate::security::auth::{authenticate_middleware, Authenticator};
use crate::security::authorization::{authorize_middleware, Guard};
use crate::security::principal::PrincipalRegistry;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiters};
use self::handlers::*;

pub fn setup_accounts_router(limiters: &RateLimiters, registry: Arc<PrincipalRegistry>) -> Router<AppState> {
    let staff_only = ServiceBuilder::new()
        .layer(from_fn_with_state(limiters.api.clone(), rate_limit_middleware))
        .layer(from_fn_with_state(Authenticator::token(registry), authenticate_middleware))
        .layer(from_fn_with_state(Guard::moderator_or_admin(), authorize_middleware));

    Router::new()
        .route(
            "/auth/token",
            post(issue_token)
                .route_layer(from_fn_with_state(limiters.auth.clone(), rate_limit_middleware)),
        )
        .route("/auth/users", get(list_users).route_layer(staff_only))
}
