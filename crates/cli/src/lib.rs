use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "goldfeed.yaml";

#[derive(Parser, Debug)]
#[command(name = "goldfeed")]
#[command(about = "Goldfeed - gold price feed with AI market commentary")]
#[command(version)]
pub struct Cli {
    /// Log output format (overrides logging.format from the config file)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server and the refresh worker
    Start {
        /// Path to the configuration file (defaults apply if it does not exist)
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the HTTP port (takes precedence over PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Skip the refresh that normally runs at startup
        #[arg(long)]
        no_startup_refresh: bool,
    },

    /// Validate configuration without starting the service
    Validate {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with all defaults
    Init {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Scrape the price once and print the resulting cache entry as JSON
    Scrape {
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Also generate the market summary from the fresh price
        #[arg(long)]
        with_summary: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormatArg {
    Pretty,
    Json,
    Compact,
}

impl LogFormatArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormatArg::Pretty => "pretty",
            LogFormatArg::Json => "json",
            LogFormatArg::Compact => "compact",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
