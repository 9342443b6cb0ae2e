//! Handler for the `logout` command.

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Clear the stored username and token.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = cli.config_path()?;
    if !path.exists() {
        output::note("No configuration file; nothing to clear");
        return Ok(());
    }

    let mut config = Config::load(&path)?;
    config.clear_credentials();
    config.save(&path)?;

    output::success("Signed out");
    output::field("Config", path.display());
    Ok(())
}
