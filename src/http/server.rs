//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build shared state (catalog, principal registry, rate limiters) from config
//! - Create the Axum router with all endpoints and their guard chains
//! - Wire up service-wide middleware (tracing, request id, timeout, limits)
//! - Run the rate limiter sweepers alongside the server
//! - Serve until shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, HeaderValue, Method, Request, Uri},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::accounts::setup_accounts_router;
use crate::catalog::CatalogService;
use crate::config::DrinksConfig;
use crate::drinks::setup_drinks_router;
use crate::http::error::ApiError;
use crate::http::landing;
use crate::http::request::{make_request_span, MakeRequestUuid, X_REQUEST_ID};
use crate::observability::metrics;
use crate::security::principal::PrincipalRegistry;
use crate::security::rate_limit::RateLimiters;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub registry: Arc<PrincipalRegistry>,
}

/// HTTP server for the drinks API.
pub struct HttpServer {
    router: Router,
    config: DrinksConfig,
    limiters: RateLimiters,
}

impl HttpServer {
    /// Create a new HTTP server over the built-in seed catalog.
    pub fn new(config: DrinksConfig) -> Self {
        Self::with_catalog(config, CatalogService::seeded())
    }

    pub fn with_catalog(config: DrinksConfig, catalog: CatalogService) -> Self {
        let registry = Arc::new(PrincipalRegistry::from_config(&config.principals));
        let limiters = RateLimiters::from_config(&config.rate_limit);

        tracing::info!(
            principals = registry.len(),
            drinks = catalog.len(),
            rate_limiting = config.rate_limit.enabled,
            "Initialized API state"
        );

        let state = AppState {
            catalog: Arc::new(catalog),
            registry: registry.clone(),
        };

        let router = Self::build_router(&config, state, &limiters, registry);
        Self {
            router,
            config,
            limiters,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(
        config: &DrinksConfig,
        state: AppState,
        limiters: &RateLimiters,
        registry: Arc<PrincipalRegistry>,
    ) -> Router {
        let router = Router::new()
            .route("/", get(landing::index))
            .merge(setup_drinks_router(limiters, registry.clone()))
            .merge(setup_accounts_router(limiters, registry))
            .method_not_allowed_fallback(not_found)
            .fallback(not_found)
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            );

        if config.security.security_headers {
            router.layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
        } else {
            router
        }
    }

    /// The fully layered router, e.g. for driving requests in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Each sweeper listens to the same shutdown broadcast as the server.
        if self.config.rate_limit.enabled {
            let every = Duration::from_secs(self.config.rate_limit.sweep_interval_secs);
            for limiter in self.limiters.all() {
                let limiter = limiter.clone();
                let rx = shutdown.resubscribe();
                tokio::spawn(async move {
                    limiter.run_sweeper(every, rx).await;
                });
            }
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        let mut shutdown = shutdown;
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// JSON 404 for anything no route claims, including a known path under an
/// unregistered method.
async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} {} not found", method, uri.path()))
}

async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
