//! Google Gemini client
//!
//! Calls `POST {base_url}/v1beta/models/{model}:generateContent` and returns
//! the concatenated text parts of the first candidate.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error};

use crate::error::AdvisorError;
use crate::generator::TextGenerator;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest upstream error body echoed into logs
const MAX_ERROR_BODY: usize = 300;

/// Connection settings for [`GeminiClient`]
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// [`TextGenerator`] backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AdvisorError::Client(e.to_string()))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            client,
            api_key: settings.api_key,
            endpoint,
            model: settings.model,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "Requesting generation");

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisorError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(MAX_ERROR_BODY).collect();
            error!(status = status.as_u16(), body = %snippet, "Generation request rejected");
            return Err(AdvisorError::Upstream(format!("HTTP {}", status.as_u16())));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AdvisorError::Upstream(format!("invalid response body: {}", e)))?;

        candidate_text(&value)
            .ok_or_else(|| AdvisorError::Upstream("response contained no text".to_string()))
    }
}

/// Text parts of the first candidate, joined; `None` if there is no text
fn candidate_text(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect::<Vec<_>>()
        .join("");

    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::net::SocketAddr;

    async fn spawn_fake_gemini() -> SocketAddr {
        let app = Router::new().route(
            "/v1beta/models/*action",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let key = headers
                    .get("x-goog-api-key")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();

                match key.as_str() {
                    "good-key" => (
                        StatusCode::OK,
                        Json(json!({
                            "candidates": [{
                                "content": { "parts": [
                                    { "text": "echo: " },
                                    { "text": prompt }
                                ]}
                            }]
                        })),
                    ),
                    "empty-key" => (StatusCode::OK, Json(json!({ "candidates": [] }))),
                    _ => (
                        StatusCode::FORBIDDEN,
                        Json(json!({ "error": { "message": "API key not valid" } })),
                    ),
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client(addr: SocketAddr, key: &str) -> GeminiClient {
        GeminiClient::new(GeminiSettings {
            base_url: format!("http://{}/", addr),
            model: "gemini-test".into(),
            timeout: Duration::from_secs(5),
            ..GeminiSettings::new(key)
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_format() {
        let c = GeminiClient::new(GeminiSettings::new("k")).unwrap();
        assert_eq!(
            c.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generates_text() {
        let addr = spawn_fake_gemini().await;
        let text = client(addr, "good-key").generate_text("halo").await.unwrap();
        assert_eq!(text, "echo: halo");
    }

    #[tokio::test]
    async fn test_rejected_key_is_upstream_error() {
        let addr = spawn_fake_gemini().await;
        let result = client(addr, "bad-key").generate_text("halo").await;
        assert_eq!(result, Err(AdvisorError::Upstream("HTTP 403".into())));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_upstream_error() {
        let addr = spawn_fake_gemini().await;
        let result = client(addr, "empty-key").generate_text("halo").await;
        assert_matches!(result, Err(AdvisorError::Upstream(ref m)) if m.contains("no text"));
    }

    #[test]
    fn test_candidate_text_skips_non_text_parts() {
        let value = json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": {} },
                { "text": "  hasil  " }
            ]}}]
        });
        assert_eq!(candidate_text(&value), Some("hasil".to_string()));
        assert_eq!(candidate_text(&json!({})), None);
    }
}
