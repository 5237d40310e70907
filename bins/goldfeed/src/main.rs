//! Goldfeed CLI and server binary
//!
//! Commands for initializing and validating configuration, running a single
//! scrape, and starting the HTTP server with its refresh worker.

mod app;

use anyhow::{Context, Result};
use api::{build_router, AppState};
use cli::{Cli, Commands};
use config::{
    apply_env_overrides, generate_default_config, load_config_or_default, save_config,
    validate_config, validate_document, GoldfeedConfig, ValidationReport,
};
use observability::{init_logging, init_metrics, LogFormat};
use server::{validate_port_available, HealthState, HttpServer, Server, ServerConfig, ShutdownController};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::app::{worker_settings, Components};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            port,
            no_startup_refresh,
        } => {
            let config_file = load_config_or_default(&config)?;
            setup_logging(&config_file, cli.log_format)?;
            info!("Executing 'start' command");
            start_command(config_file, port, no_startup_refresh).await
        }
        Commands::Validate { config } => {
            setup_logging(&GoldfeedConfig::default(), cli.log_format)?;
            info!("Executing 'validate' command");
            validate_command(&config)
        }
        Commands::Init { output, force } => {
            setup_logging(&GoldfeedConfig::default(), cli.log_format)?;
            info!("Executing 'init' command");
            init_command(&output, force)
        }
        Commands::Scrape {
            config,
            with_summary,
        } => {
            let config_file = load_config_or_default(&config)?;
            setup_logging(&config_file, cli.log_format)?;
            info!("Executing 'scrape' command");
            scrape_command(config_file, with_summary).await
        }
    }
}

/// CLI flag wins over `logging.format`; an unknown configured format falls
/// back to pretty.
fn setup_logging(config: &GoldfeedConfig, flag: Option<cli::LogFormatArg>) -> Result<()> {
    let requested = flag
        .map(|f| f.as_str())
        .unwrap_or(config.logging.format.as_str());
    let format = LogFormat::parse(requested);

    init_logging(&config.service.name, format.unwrap_or_default())?;
    if format.is_none() {
        warn!(format = requested, "Unknown log format, using pretty");
    }
    Ok(())
}

fn log_report(report: &ValidationReport) -> Result<()> {
    for warning in &report.warnings {
        warn!(field = %warning.field, message = %warning.message, "Configuration warning");
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start due to configuration errors");
    }
    Ok(())
}

async fn start_command(
    mut config: GoldfeedConfig,
    port_override: Option<u16>,
    no_startup_refresh: bool,
) -> Result<()> {
    apply_env_overrides(&mut config)?;
    if let Some(port) = port_override {
        debug!(port, "Port overridden from command line");
        config.server.port = port;
    }

    log_report(&validate_config(&config))?;

    if let Some(port) = config.metrics.port {
        init_metrics(port)?;
    }

    let components = Components::build(&config)?;

    let mut settings = worker_settings(&config.schedule)?;
    if no_startup_refresh {
        settings.run_on_startup = false;
    }

    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port);
    validate_port_available(&server_config).await?;

    let shutdown = ShutdownController::with_ctrl_c();
    let worker = components.worker(settings).spawn(shutdown.child_token());

    let probe_prices = Arc::clone(&components.prices);
    let health = HealthState::new(config.service.name.clone())
        .with_feed_probe(move || probe_prices.read().status().to_string());

    let state = AppState::new(
        Arc::clone(&components.prices),
        Arc::clone(&components.summaries),
        components.advisor.clone(),
    );
    let router = build_router(state, Arc::new(health), &config.cors.allowed_origins);

    info!(
        service = %config.service.name,
        host = %config.server.host,
        port = config.server.port,
        source = %config.source.url,
        target_label = %config.source.target_label,
        daily_at = %config.schedule.daily_at,
        "Starting Goldfeed"
    );

    let server = HttpServer::new(server_config, router);
    let result = server.run(shutdown.child_token()).await;

    // Stop the worker whether the server exited cleanly or not
    shutdown.shutdown();
    if let Err(e) = worker.await {
        error!(%e, "Refresh worker task failed");
    }

    result.context("HTTP server failed")
}

async fn scrape_command(mut config: GoldfeedConfig, with_summary: bool) -> Result<()> {
    apply_env_overrides(&mut config)?;
    log_report(&validate_config(&config))?;

    let components = Components::build(&config)?;
    if with_summary && components.summary.is_none() {
        warn!("Market summary is disabled in configuration");
    }

    components.scrape_worker(with_summary).run_once().await;

    let entry = components.prices.read();
    println!("{}", serde_json::to_string_pretty(entry.as_ref())?);
    if with_summary && components.summary.is_some() {
        let summary = components.summaries.read();
        println!("{}", serde_json::to_string_pretty(summary.as_ref())?);
    }

    if !entry.is_success() {
        anyhow::bail!("Price refresh failed");
    }
    Ok(())
}

fn validate_command(config_path: &Path) -> Result<()> {
    info!(path = ?config_path, "Validating configuration");

    let content = if config_path.exists() {
        std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?
    } else {
        warn!(path = ?config_path, "Config file not found, validating defaults");
        String::new()
    };

    let (mut config, report) = match validate_document(&content) {
        Ok(validated) => validated,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    apply_env_overrides(&mut config)?;

    println!("[ok] Configuration is valid!");
    println!();
    println!("Service: {}", config.service.name);
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Source: {}", config.source.url);
    println!("Target: {}", config.source.target_label);
    println!(
        "Schedule: {} (daily {}, on startup {})",
        config.schedule.daily_at, config.schedule.enabled, config.schedule.run_on_startup
    );
    println!(
        "AI: {} ({})",
        config.ai.model,
        if config.ai.resolved_api_key().is_some() {
            "configured"
        } else {
            "no API key"
        }
    );

    Ok(())
}

fn init_command(output_path: &Path, force: bool) -> Result<()> {
    info!(?output_path, "Initializing new configuration file");

    if output_path.exists() && !force {
        anyhow::bail!(
            "{:?} already exists; pass --force to overwrite it",
            output_path
        );
    }

    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Export GEMINI_API_KEY to enable the AI endpoints");
    println!(
        "  2. Run 'goldfeed validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'goldfeed start --config {:?}' to start the service",
        output_path
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("goldfeed.yaml");

        init_command(&path, false).unwrap();
        assert!(path.exists());
        assert!(init_command(&path, false).is_err());
        init_command(&path, true).unwrap();

        validate_command(&path).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("goldfeed.yaml");
        std::fs::write(&path, "schedule:\n  daily_at: \"25:00\"\n").unwrap();

        assert!(validate_command(&path).is_err());
    }
}
