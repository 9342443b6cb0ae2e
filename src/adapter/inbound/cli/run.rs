//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::{Cli, RunArgs};
use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::{Config, API_TOKEN_ENV};
use crate::infrastructure::orchestration;

/// Execute the run command.
pub async fn execute(cli: &Cli, args: &RunArgs) -> Result<()> {
    let path = cli.config_path()?;
    let mut config = Config::load(&path)?;
    args.apply(&mut config);
    config.validate()?;

    if config.credentials.api_token.is_empty() {
        output::hint(&format!(
            "run `bushtalk-bridge login` or set {API_TOKEN_ENV}"
        ));
        return Err(ConfigError::MissingField {
            field: "credentials.api_token",
        }
        .into());
    }

    print_startup(&config, &path);
    config.logging.init();

    orchestration::run(config).await
}

fn print_startup(config: &Config, path: &std::path::Path) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", path.display());
    output::field(
        "Simulator",
        format!("{}:{}", config.simulator.host, config.simulator.port),
    );
    output::field("Tracker", &config.tracker.api_url);
    if !config.credentials.username.is_empty() {
        output::field("Pilot", &config.credentials.username);
    }
    if let Some(status) = &config.status_file {
        output::field("Status", status.display());
    }
    output::note("Press Ctrl-C to stop");
}
