//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod login;
pub mod logout;
pub mod output;
pub mod run;
pub mod status;

use command::{CheckCommand, Cli, Commands};
use output::OutputConfig;

use crate::error::Result;

/// Environment variable read by `login` instead of prompting for a password.
pub const PASSWORD_ENV: &str = "BUSHTALK_PASSWORD";

/// Execute the parsed command line.
///
/// # Errors
///
/// Returns whatever error the selected command produced.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Run(args) => run::execute(&cli, args).await,
        Commands::Login(args) => login::execute(&cli, args).await,
        Commands::Logout => logout::execute(&cli),
        Commands::Status(args) => status::execute(&cli, args),
        Commands::Check(CheckCommand::Config) => check::config::execute(&cli),
        Commands::Check(CheckCommand::Simulator) => check::simulator::execute(&cli).await,
    }
}
