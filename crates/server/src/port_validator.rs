//! Port validation
//!
//! Checking a port before binding races with other processes; this check
//! gives early feedback at startup, the real bind is still authoritative.

use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// Check that the configured port can be bound right now.
///
/// Port 0 always succeeds since the OS picks the port at bind time.
pub async fn validate_port_available(config: &ServerConfig) -> Result<()> {
    if config.port == 0 {
        debug!("Ephemeral port configured, skipping availability check");
        return Ok(());
    }

    let addr = format!("{}:{}", config.host, config.port);
    match TcpListener::bind(&addr).await {
        Ok(listener) => {
            let local_addr = listener
                .local_addr()
                .map_err(|e| ServerError::bind(addr.clone(), e))?;
            drop(listener);

            info!(%local_addr, "HTTP port is available");
            Ok(())
        }
        Err(e) => {
            error!(port = config.port, error = %e, "HTTP port is NOT available");
            Err(ServerError::port_in_use(config.port, e.to_string()))
        }
    }
}
