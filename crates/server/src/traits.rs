//! Server lifecycle trait

use async_trait::async_trait;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Lifecycle interface, implemented by [`HttpServer`](crate::http::HttpServer).
#[async_trait]
pub trait Server: Send + Sync + 'static {
    /// Name for logging and identification
    fn name(&self) -> &str;

    /// Address the server is bound to, if running
    fn address(&self) -> Option<SocketAddr>;

    fn is_running(&self) -> bool;

    /// Runs the server until the shutdown token is cancelled.
    ///
    /// Implementations bind, serve until `shutdown` fires, drain in-flight
    /// requests and return `Ok(())` on a clean stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or hits a fatal error.
    async fn run(&self, shutdown: CancellationToken) -> Result<()>;
}
