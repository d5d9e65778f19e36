//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, service-wide layers)
//!     → request.rs (request id, access log span)
//!     → per-route guard chain (security::*, drink validation)
//!     → drinks / accounts handlers, landing.rs
//!     → error.rs (structured JSON for every failure)
//!     → Send to client
//! ```

pub mod error;
pub mod landing;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
