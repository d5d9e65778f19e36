//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request on a guarded route:
//!     → rate_limit.rs (per-key fixed window, X-RateLimit-* headers)
//!     → auth.rs (bearer credential → Principal extension)
//!     → authorization.rs (permission / role guard)
//!     → drink payload validation (mutating routes only)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Every layer short-circuits with a structured error response
//! - Guards are values built from configuration, composed per route
//! - Principal registry is read-only after startup

pub mod auth;
pub mod authorization;
pub mod principal;
pub mod rate_limit;

pub use auth::{AuthError, AuthScheme, Authenticator};
pub use authorization::{AuthzError, Guard};
pub use principal::{Principal, PrincipalRegistry, Role};
pub use rate_limit::{RateLimiter, RateLimiters};
