//! Goldfeed configuration
//!
//! YAML file with `${VAR}` substitution. Every field has a default, so an
//! empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GoldfeedConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Page to scrape and the row to keep
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    /// CSS selector matching the price table rows
    #[serde(default = "default_row_selector")]
    pub row_selector: String,
    /// Denomination label to select (case-insensitive exact match)
    #[serde(default = "default_target_label")]
    pub target_label: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_source_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            row_selector: default_row_selector(),
            target_label: default_target_label(),
            user_agent: default_user_agent(),
            timeout_seconds: default_source_timeout_seconds(),
        }
    }
}

/// When the refresh worker runs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Daily refresh on/off
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_enabled")]
    pub run_on_startup: bool,
    /// Local wall-clock time, `HH:MM`
    #[serde(default = "default_daily_at")]
    pub daily_at: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            run_on_startup: true,
            daily_at: default_daily_at(),
        }
    }
}

/// Text-generation service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_enabled")]
    pub market_summary_enabled: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_ai_model(),
            base_url: default_ai_base_url(),
            timeout_seconds: default_ai_timeout_seconds(),
            market_summary_enabled: true,
        }
    }
}

impl AiConfig {
    /// The API key if one is set and fully substituted
    pub fn resolved_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !has_unresolved_env_vars(key))
    }
}

/// Empty list means any origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `pretty`, `json` or `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

/// Prometheus exporter; disabled when no port is set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_all_defaults() {
        let config: GoldfeedConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, GoldfeedConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.source.target_label, "1gram");
        assert_eq!(config.schedule.daily_at, "03:00");
        assert!(config.ai.api_key.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: GoldfeedConfig =
            serde_yaml::from_str("source:\n  target_label: 5gram\n").unwrap();
        assert_eq!(config.source.target_label, "5gram");
        assert_eq!(config.source.timeout_seconds, 30);
        assert_eq!(config.source.url, default_source_url());
    }

    #[test]
    fn test_resolved_api_key() {
        let mut ai = AiConfig::default();
        assert_eq!(ai.resolved_api_key(), None);

        ai.api_key = Some("${GEMINI_API_KEY}".into());
        assert_eq!(ai.resolved_api_key(), None);

        ai.api_key = Some("  ".into());
        assert_eq!(ai.resolved_api_key(), None);

        ai.api_key = Some("abc123".into());
        assert_eq!(ai.resolved_api_key(), Some("abc123"));
    }
}
