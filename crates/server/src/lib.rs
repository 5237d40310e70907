//! HTTP server infrastructure for Goldfeed
//!
//! The server crate owns the listener lifecycle; routes are supplied by the
//! caller as an axum [`Router`](axum::Router).
//!
//! # Architecture
//!
//! [`HttpServer`] implements the [`Server`] trait, which provides a consistent
//! interface for running and monitoring it.
//!
//! Shutdown coordination uses `CancellationToken` from `tokio_util`; other
//! long-running tasks (the refresh worker) take child tokens of the same
//! [`ShutdownController`].
//!
//! # Quick Start
//!
//! ```ignore
//! use server::{HttpServer, Server, ServerConfig, ShutdownController};
//!
//! let shutdown = ShutdownController::with_ctrl_c();
//! let server = HttpServer::new(ServerConfig::new("0.0.0.0", 3000), router);
//! server.run(shutdown.child_token()).await?;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Bind address configuration
//! - [`traits`] - `Server` lifecycle trait
//! - [`http`] - HTTP server using Axum
//! - [`health`] - Health check endpoint
//! - [`port_validator`] - Early port availability check
//! - [`shutdown`] - Graceful shutdown utilities

pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod port_validator;
pub mod shutdown;
pub mod traits;

pub use config::{ServerConfig, DEFAULT_PORT};
pub use error::{Result, ServerError};
pub use health::{health_routes, HealthState, HealthStatus};
pub use http::HttpServer;
pub use port_validator::validate_port_available;
pub use shutdown::ShutdownController;
pub use traits::Server;
