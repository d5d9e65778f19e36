//! Drink endpoints.
//!
//! # Guard chains
//! ```text
//! GET    /drinks          → search limiter
//! GET    /drinks/random   → api limiter
//! POST   /drinks          → write limiter → API key → `write` → payload validation
//! PATCH  /drinks/{id}     → write limiter → API key → `write` → payload validation
//! DELETE /drinks/{id}     → write limiter → API key → `delete`
//! ```
//!
//! `/drinks/random` is a static route and wins over `/drinks/{id}`, so it
//! repeats the PATCH and DELETE chains to keep `random` usable as an id.

pub mod handlers;
pub mod mutation;
pub mod validation;

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;

use crate::http::server::AppState;
use crate::security::auth::{authenticate_middleware, Authenticator};
use crate::security::authorization::{authorize_middleware, Guard};
use crate::security::principal::PrincipalRegistry;
use crate::security::rate_limit::{rate_limit_middleware, RateLimiters};
use self::handlers::*;
use self::validation::validate_drink_middleware;

pub fn setup_drinks_router(limiters: &RateLimiters, registry: Arc<PrincipalRegistry>) -> Router<AppState> {
    let api_key = Authenticator::api_key(registry);

    let write_chain = ServiceBuilder::new()
        .layer(from_fn_with_state(limiters.write.clone(), rate_limit_middleware))
        .layer(from_fn_with_state(api_key.clone(), authenticate_middleware))
        .layer(from_fn_with_state(Guard::write(), authorize_middleware))
        .layer(from_fn(validate_drink_middleware));

    let delete_chain = ServiceBuilder::new()
        .layer(from_fn_with_state(limiters.write.clone(), rate_limit_middleware))
        .layer(from_fn_with_state(api_key, authenticate_middleware))
        .layer(from_fn_with_state(Guard::delete(), authorize_middleware));

    Router::new()
        .route(
            "/drinks",
            get(search_drinks)
                .route_layer(from_fn_with_state(limiters.search.clone(), rate_limit_middleware)),
        )
        .route("/drinks", post(create_drink).route_layer(write_chain.clone()))
        .route(
            "/drinks/random",
            get(random_drink)
                .route_layer(from_fn_with_state(limiters.api.clone(), rate_limit_middleware)),
        )
        .route("/drinks/random", patch(update_drink).route_layer(write_chain.clone()))
        .route("/drinks/random", delete(delete_drink).route_layer(delete_chain.clone()))
        .route("/drinks/{id}", patch(update_drink).route_layer(write_chain))
        .route("/drinks/{id}", delete(delete_drink).route_layer(delete_chain))
}
