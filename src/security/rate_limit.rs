//! Fixed-window rate limiting middleware.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use tokio::sync::broadcast;
use tokio::time;

use crate::config::{RateLimitConfig, WindowConfig};
use crate::http::error::ApiError;
use crate::observability::metrics;

pub const X_RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
pub const X_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub const X_RATELIMIT_RESET: &str = "x-ratelimit-reset";

/// Keys by the peer IP, or `"unknown"` when no connection info is attached.
pub fn client_ip_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Request count inside one window for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    /// Only set when denied.
    pub retry_after_secs: Option<u64>,
}

impl Decision {
    fn write_headers(&self, headers: &mut HeaderMap) {
        headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(self.remaining));
        let reset = self.reset_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        if let Ok(value) = HeaderValue::from_str(&reset) {
            headers.insert(X_RATELIMIT_RESET, value);
        }
    }
}

/// One independent fixed-window limiter.
///
/// Entries live in a sharded map; the read-modify-write for a key runs under
/// that key's shard lock, so concurrent requests never lose an increment.
pub struct RateLimiter {
    name: &'static str,
    entries: DashMap<String, RateLimitEntry>,
    window: TimeDelta,
    max_requests: u32,
    message: String,
    enabled: bool,
}

impl RateLimiter {
    pub fn new(name: &'static str, config: &WindowConfig) -> Self {
        Self {
            name,
            entries: DashMap::new(),
            window: TimeDelta::milliseconds(i64::try_from(config.window_ms).unwrap_or(i64::MAX)),
            max_requests: config.max_requests,
            message: config.message.clone(),
            enabled: true,
        }
    }

    /// A disabled limiter admits everything and emits no headers.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }

    /// Count one request for `key` at `now`.
    pub fn check(&self, key: &str, now: DateTime<Utc>) -> Decision {
        let entry = match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if now >= entry.reset_at {
                    *entry = self.open_window(now);
                } else {
                    entry.count = entry.count.saturating_add(1);
                }
                *entry
            }
            Entry::Vacant(vacant) => *vacant.insert(self.open_window(now)),
        };

        let allowed = entry.count <= self.max_requests;
        let retry_after_secs = (!allowed).then(|| {
            let millis = (entry.reset_at - now).num_milliseconds().max(0) as u64;
            millis.div_ceil(1000)
        });

        Decision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_at: entry.reset_at,
            retry_after_secs,
        }
    }

    fn open_window(&self, now: DateTime<Utc>) -> RateLimitEntry {
        RateLimitEntry {
            count: 1,
            reset_at: now + self.window,
        }
    }

    /// Drop every entry whose window has ended. Returns how many were removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.reset_at > now);
        let removed = before.saturating_sub(self.entries.len());
        metrics::record_rate_limit_keys(self.name, self.entries.len());
        removed
    }

    /// Periodically sweep until shutdown.
    pub async fn run_sweeper(self: Arc<Self>, every: Duration, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = time::interval(every);
        // The first tick fires immediately; nothing can have expired yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.sweep(Utc::now());
                    if removed > 0 {
                        tracing::debug!(limiter = self.name, removed, "Swept expired rate limit entries");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!(limiter = self.name, "Rate limit sweeper stopping");
                    break;
                }
            }
        }
    }
}

/// The four limiters guarding the API, each with independent state.
#[derive(Clone)]
pub struct RateLimiters {
    pub search: Arc<RateLimiter>,
    pub api: Arc<RateLimiter>,
    pub write: Arc<RateLimiter>,
    pub auth: Arc<RateLimiter>,
}

impl RateLimiters {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let build = |name, window: &WindowConfig| {
            Arc::new(RateLimiter::new(name, window).enabled(config.enabled))
        };
        Self {
            search: build("search", &config.search),
            api: build("api", &config.api),
            write: build("write", &config.write),
            auth: build("auth", &config.auth),
        }
    }

    pub fn all(&self) -> [&Arc<RateLimiter>; 4] {
        [&self.search, &self.api, &self.write, &self.auth]
    }
}

/// Middleware function for fixed-window rate limiting.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !limiter.enabled {
        return next.run(request).await;
    }

    let key = client_ip_key(&request);
    let decision = limiter.check(&key, Utc::now());

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        tracing::warn!(client = %key, limiter = limiter.name, "Rate limit exceeded");
        metrics::record_rate_limited(limiter.name);
        ApiError::RateLimited {
            message: limiter.message.clone(),
            retry_after: decision.retry_after_secs.unwrap_or(1),
        }
        .into_response()
    };

    decision.write_headers(response.headers_mut());
    response
}
