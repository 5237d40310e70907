//! Text generation capability

use async_trait::async_trait;

use crate::error::AdvisorError;
use crate::Result;

/// Opaque text-in/text-out service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Stand-in used when no credential is configured; every call fails with
/// [`AdvisorError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        Err(AdvisorError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_always_fails() {
        let result = UnconfiguredGenerator.generate_text("hello").await;
        assert_eq!(result, Err(AdvisorError::NotConfigured));
    }
}
