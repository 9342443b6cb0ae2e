//! Command-line interface definitions.
//!
//! Defines the CLI structure using `clap`: running the bridge, managing the
//! stored login, inspecting a running bridge and diagnostic checks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::infrastructure::config::Config;

/// Stream X-Plane positions to the Bushtalk Radio flight tracker
#[derive(Parser, Debug)]
#[command(name = "bushtalk-bridge")]
#[command(version, about)]
pub struct Cli {
    /// Path to configuration file [default: <config dir>/bushtalk-bridge/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The `--config` path, or the platform default.
    ///
    /// # Errors
    ///
    /// Fails only when no path was given and the platform has no config directory.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream positions until interrupted
    Run(RunArgs),

    /// Log in to Bushtalk Radio
    Login(LoginArgs),

    /// Forget the stored username and token
    Logout,

    /// Show the status file of a running bridge
    Status(StatusArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `bushtalk-bridge check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file
    Config,
    /// Resolve datarefs and open the X-Plane WebSocket once
    Simulator,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Override the X-Plane web API port
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the Bushtalk Radio API URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Write a JSON status file to this path
    #[arg(long)]
    pub status_file: Option<PathBuf>,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        if let Some(port) = self.port {
            config.simulator.port = port;
        }
        if let Some(url) = &self.api_url {
            config.tracker.api_url = url.clone();
        }
        if let Some(path) = &self.status_file {
            config.status_file = Some(path.clone());
        }
    }
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug, Default)]
pub struct LoginArgs {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Do not save the username and token to the configuration file
    #[arg(long)]
    pub no_remember: bool,
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug, Default)]
pub struct StatusArgs {
    /// Status file to read [default: `status_file` from the configuration]
    #[arg(long)]
    pub file: Option<PathBuf>,
}
