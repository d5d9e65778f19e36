//! Process lifecycle.
//!
//! ```text
//! main.rs:     config → logging → metrics → bind → HttpServer::run
//! signals.rs:  SIGINT / SIGTERM → Shutdown::trigger
//! shutdown.rs: broadcast → server stops accepting, drains, sweepers exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
