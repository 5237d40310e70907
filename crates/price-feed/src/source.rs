//! Source page fetching

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

use crate::error::FeedError;
use crate::Result;

/// Browser-like identity; the source site blocks obvious bot user agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Default bound on a single page fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can produce the raw markup of a page
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page body as text
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageSource`] backed by a shared `reqwest::Client`
#[derive(Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpPageSource {
    /// Build a client with the given user agent and request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching source page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(FeedError::NonText {
                    content_type: content_type.to_string(),
                });
            }
        }

        let body = response.text().await?;
        debug!(url, bytes = body.len(), "Fetched source page");
        Ok(body)
    }
}

fn is_textual(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.starts_with("text/") || ct.contains("html") || ct.contains("xml")
}
