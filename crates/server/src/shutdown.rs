//! Graceful shutdown coordination
//!
//! One [`ShutdownController`] per process. The HTTP server and the refresh
//! worker each take a child token, so Ctrl+C stops both while either can
//! still be cancelled on its own.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Root of the process cancellation tree.
///
/// ```ignore
/// let shutdown = ShutdownController::with_ctrl_c();
///
/// let worker = refresh_worker.spawn(shutdown.child_token());
/// http_server.run(shutdown.child_token()).await?;
/// shutdown.shutdown();
/// worker.await?;
/// ```
#[derive(Clone, Default)]
pub struct ShutdownController {
    token: CancellationToken,
}

impl ShutdownController {
    /// Controller that cancels itself on Ctrl+C.
    ///
    /// Spawns the signal listener, so it must be called inside a runtime.
    pub fn with_ctrl_c() -> Self {
        let controller = Self::default();
        let token = controller.token.clone();

        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, stopping server and refresh worker");
                    token.cancel();
                }
                Err(e) => {
                    warn!(error = %e, "Failed to listen for Ctrl+C");
                }
            }
        });

        controller
    }

    /// Token cancelled with this controller; cancelling it does not affect
    /// the parent or its siblings.
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Cancel every child token
    pub fn shutdown(&self) {
        info!("Shutdown requested");
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_cancels_children() {
        let controller = ShutdownController::default();
        let server = controller.child_token();
        let worker = controller.child_token();
        assert!(!server.is_cancelled());

        controller.shutdown();

        assert!(server.is_cancelled());
        assert!(worker.is_cancelled());
        assert!(controller.child_token().is_cancelled());
    }

    #[test]
    fn test_child_token_independence() {
        let controller = ShutdownController::default();
        let server = controller.child_token();
        let worker = controller.child_token();

        server.cancel();

        assert!(server.is_cancelled());
        assert!(!worker.is_cancelled());
        assert!(!controller.child_token().is_cancelled());
    }

    #[tokio::test]
    async fn test_with_ctrl_c_starts_uncancelled() {
        let controller = ShutdownController::with_ctrl_c();
        let token = controller.child_token();
        assert!(!token.is_cancelled());

        controller.shutdown();
        token.cancelled().await;
    }
}
