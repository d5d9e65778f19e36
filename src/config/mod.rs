//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DrinksConfig (validated, immutable)
//!     → handed to HttpServer, which builds limiters, registry and catalog from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::DrinksConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::PrincipalConfig;
pub use schema::RateLimitConfig;
pub use schema::WindowConfig;
