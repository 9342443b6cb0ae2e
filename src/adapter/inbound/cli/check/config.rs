//! Handler for `check config`.

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::{Config, API_TOKEN_ENV};

/// Validate the configuration file without connecting to anything.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = cli.config_path()?;
    output::section("Configuration Check");
    output::field("Config", path.display());

    if !path.exists() {
        output::note("File not found; defaults apply");
    }

    let config = Config::load(&path)?;
    output::success("Configuration is valid");

    output::section("Summary");
    output::field(
        "Simulator",
        format!("{}:{}", config.simulator.host, config.simulator.port),
    );
    output::field("Tracker", &config.tracker.api_url);
    output::field(
        "Intervals",
        format!(
            "track {} ms, reconnect {} ms",
            config.timing.track_interval_ms, config.timing.reconnect_delay_ms
        ),
    );
    output::field(
        "Status file",
        config
            .status_file
            .as_ref()
            .map_or_else(|| "disabled".to_string(), |p| p.display().to_string()),
    );
    output::field("Logging", format!("{} ({})", config.logging.level, config.logging.format));

    if config.has_credentials() {
        output::success(&format!("Logged in as {}", config.credentials.username));
    } else if !config.credentials.api_token.is_empty() {
        output::success(&format!("API token present ({API_TOKEN_ENV})"));
    } else {
        output::warning("No API token configured");
        output::hint("run `bushtalk-bridge login`");
    }

    Ok(())
}
