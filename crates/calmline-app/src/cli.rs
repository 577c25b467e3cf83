//! CLI argument definitions for the Calmline terminal front-end.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use calmline_core::config::default_config_path;

/// Calmline: a steady, keyword-driven conversational companion.
#[derive(Parser, Debug)]
#[command(name = "calmline", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Do not read replies aloud.
    #[arg(long = "mute")]
    pub mute: bool,

    /// Print every message as a JSON line.
    #[arg(long = "json")]
    pub json: bool,

    /// Show which keyword categories each message matched.
    #[arg(long = "explain")]
    pub explain: bool,

    /// Answer a single message and exit.
    #[arg(long = "once", value_name = "TEXT")]
    pub once: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CALMLINE_CONFIG env var > ~/.calmline/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("CALMLINE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}
