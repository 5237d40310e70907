use crate::*;
use anyhow::Context;
use chrono::NaiveTime;
use regex::Regex;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: String },

    #[error("{field}: invalid URL '{value}': {message}")]
    InvalidUrl {
        field: String,
        value: String,
        message: String,
    },

    #[error("Invalid time format '{time}': {message}")]
    InvalidTimeFormat { time: String, message: String },

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("{field}: port {port} is not usable")]
    InvalidPort { field: String, port: u16 },

    #[error("metrics.port {port} conflicts with server.port")]
    PortConflict { port: u16 },

    #[error("Invalid log format '{0}'. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("CORS origin '{origin}': {message}")]
    InvalidOrigin { origin: String, message: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

pub fn validate_config(config: &GoldfeedConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_service(config, &mut report);
    validate_source(&config.source, &mut report);
    validate_schedule(&config.schedule, &mut report);
    validate_ai(&config.ai, &mut report);
    validate_cors(&config.cors, &mut report);

    if !is_known_log_format(&config.logging.format) {
        report.add_error(ValidationError::InvalidLogFormat(config.logging.format.clone()));
    }

    report
}

/// Parse `content`, validate it and record which top-level sections were
/// filled from defaults.
pub fn validate_document(content: &str) -> anyhow::Result<(GoldfeedConfig, ValidationReport)> {
    let config = parse_config(content)?;
    let mut report = validate_config(&config);

    let substituted = substitution::substitute_env_vars(content)?;
    let raw: serde_yaml::Value = if substituted.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        serde_yaml::from_str(&substituted).context("Failed to parse YAML configuration")?
    };

    let sections = [
        ("service", format!("name={}", config.service.name)),
        ("server", format!("{}:{}", config.server.host, config.server.port)),
        ("source", config.source.url.clone()),
        ("schedule", format!("daily at {}", config.schedule.daily_at)),
        ("ai", config.ai.model.clone()),
        ("cors", "any origin".to_string()),
        ("logging", config.logging.format.clone()),
        ("metrics", "disabled".to_string()),
    ];
    for (section, value) in sections {
        if raw.get(section).is_none() {
            report.add_default(section, &value);
        }
    }

    Ok((config, report))
}

fn validate_service(config: &GoldfeedConfig, report: &mut ValidationReport) {
    if config.service.name.trim().is_empty() {
        report.add_error(ValidationError::MissingField {
            field: "service.name".to_string(),
        });
    }

    if config.server.host.trim().is_empty() {
        report.add_error(ValidationError::MissingField {
            field: "server.host".to_string(),
        });
    }

    if config.server.port == 0 {
        report.add_error(ValidationError::InvalidPort {
            field: "server.port".to_string(),
            port: 0,
        });
    } else if config.server.port < 1024 {
        report.add_warning("server.port", "Privileged port (requires root/admin privileges)");
    }

    if let Some(port) = config.metrics.port {
        if port == 0 {
            report.add_error(ValidationError::InvalidPort {
                field: "metrics.port".to_string(),
                port,
            });
        } else if port == config.server.port {
            report.add_error(ValidationError::PortConflict { port });
        }
    }
}

fn validate_source(source: &SourceConfig, report: &mut ValidationReport) {
    validate_http_url("source.url", &source.url, report);

    if source.row_selector.trim().is_empty() {
        report.add_error(ValidationError::MissingField {
            field: "source.row_selector".to_string(),
        });
    }

    if source.target_label.trim().is_empty() {
        report.add_error(ValidationError::MissingField {
            field: "source.target_label".to_string(),
        });
    }

    if source.user_agent.trim().is_empty() {
        report.add_warning(
            "source.user_agent",
            "Empty user agent; the source site may reject the request",
        );
    }

    if source.timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "source.timeout_seconds".to_string(),
        });
    }
}

fn validate_schedule(schedule: &ScheduleConfig, report: &mut ValidationReport) {
    if let Err(message) = check_daily_time(&schedule.daily_at) {
        report.add_error(ValidationError::InvalidTimeFormat {
            time: schedule.daily_at.clone(),
            message,
        });
    }

    if !schedule.enabled && !schedule.run_on_startup {
        report.add_warning(
            "schedule",
            "Both the daily refresh and the startup refresh are off; prices will never load",
        );
    }
}

fn validate_ai(ai: &AiConfig, report: &mut ValidationReport) {
    match ai.api_key.as_deref() {
        Some(key) if has_unresolved_env_vars(key) => report.add_warning(
            "ai.api_key",
            "Placeholder not resolved; AI endpoints will report an error",
        ),
        None => report.add_warning("ai.api_key", "No API key; AI endpoints will report an error"),
        Some(key) if key.trim().is_empty() => {
            report.add_warning("ai.api_key", "Empty API key; AI endpoints will report an error")
        }
        Some(_) => {}
    }

    if ai.model.trim().is_empty() {
        report.add_error(ValidationError::MissingField {
            field: "ai.model".to_string(),
        });
    }

    validate_http_url("ai.base_url", &ai.base_url, report);

    if ai.timeout_seconds == 0 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "ai.timeout_seconds".to_string(),
        });
    }
}

fn validate_cors(cors: &CorsConfig, report: &mut ValidationReport) {
    for origin in &cors.allowed_origins {
        let trimmed = origin.trim();
        if trimmed == "*" {
            report.add_warning(
                "cors.allowed_origins",
                "'*' is not an origin; leave the list empty to allow any origin",
            );
            continue;
        }

        match Url::parse(trimmed) {
            Ok(url) if url.path() == "/" && url.query().is_none() && url.has_host() => {}
            Ok(_) => report.add_error(ValidationError::InvalidOrigin {
                origin: origin.clone(),
                message: "must be scheme://host[:port] without a path".to_string(),
            }),
            Err(e) => report.add_error(ValidationError::InvalidOrigin {
                origin: origin.clone(),
                message: e.to_string(),
            }),
        }
    }
}

fn validate_http_url(field: &str, value: &str, report: &mut ValidationReport) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => report.add_error(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => report.add_error(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
            message: e.to_string(),
        }),
    }
}

/// `HH:MM`, 24-hour clock
fn check_daily_time(value: &str) -> std::result::Result<(), String> {
    let re = Regex::new(r"^\d{2}:\d{2}$").map_err(|e| e.to_string())?;
    if !re.is_match(value) {
        return Err("expected HH:MM".to_string());
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| "hour must be 00-23 and minute 00-59".to_string())
}

fn is_known_log_format(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "pretty" | "json" | "compact"
    )
}
