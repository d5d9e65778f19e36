//! Mock cocktail drinks API library.

pub mod accounts;
pub mod catalog;
pub mod config;
pub mod drinks;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::DrinksConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
