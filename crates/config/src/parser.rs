use crate::*;
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "PORT";
/// Environment variable supplying `ai.api_key`
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GoldfeedConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());
    parse_config(&content)
}

/// Load `path`, or fall back to defaults when the file does not exist.
///
/// Any other read or parse failure is still an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<GoldfeedConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        info!("Config file {:?} not found, using defaults", path);
        Ok(GoldfeedConfig::default())
    }
}

/// Substitute `${VAR}` placeholders and parse YAML
pub fn parse_config(content: &str) -> Result<GoldfeedConfig> {
    if content.trim().is_empty() {
        return Ok(GoldfeedConfig::default());
    }

    let substituted = substitution::substitute_env_vars(content)?;
    debug!("Environment variable substitution completed");

    let config: GoldfeedConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Apply `PORT` and `GEMINI_API_KEY` from the process environment
pub fn apply_env_overrides(config: &mut GoldfeedConfig) -> Result<()> {
    apply_overrides_with(config, |name| env::var(name).ok())
}

/// Apply overrides using `lookup` instead of the process environment
pub fn apply_overrides_with<F>(config: &mut GoldfeedConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(PORT_ENV) {
        let raw = raw.trim();
        if !raw.is_empty() {
            let port: u16 = match raw.parse() {
                Ok(port) => port,
                Err(_) => bail!("{} must be a port number, got {:?}", PORT_ENV, raw),
            };
            debug!(port, "Port overridden from environment");
            config.server.port = port;
        }
    }

    if let Some(key) = lookup(API_KEY_ENV) {
        if key.trim().is_empty() {
            warn!("{} is set but empty", API_KEY_ENV);
        } else {
            debug!("AI API key taken from environment");
            config.ai.api_key = Some(key.trim().to_string());
        }
    }

    Ok(())
}

#[instrument]
pub fn generate_default_config() -> GoldfeedConfig {
    GoldfeedConfig {
        ai: AiConfig {
            api_key: Some(format!("${{{}}}", API_KEY_ENV)),
            ..AiConfig::default()
        },
        ..GoldfeedConfig::default()
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &GoldfeedConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}
