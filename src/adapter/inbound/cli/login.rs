//! Handler for the `login` command.

use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::adapter::inbound::cli::command::{Cli, LoginArgs};
use crate::adapter::inbound::cli::{output, PASSWORD_ENV};
use crate::adapter::outbound::bushtalk::BushtalkClient;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::{Config, API_TOKEN_ENV};

/// Authenticate against Bushtalk Radio and optionally store the token.
pub async fn execute(cli: &Cli, args: &LoginArgs) -> Result<()> {
    let path = cli.config_path()?;
    let mut config = Config::load(&path)?;
    config.logging.warnings_only().init();
    let theme = ColorfulTheme::default();

    let username = match &args.username {
        Some(username) => username.trim().to_string(),
        None => prompt_username(&theme, &config)?,
    };
    if username.is_empty() {
        return Err(ConfigError::MissingField { field: "username" }.into());
    }

    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) if !password.is_empty() => password,
        _ => {
            if output::is_json() {
                return Err(ConfigError::MissingField { field: PASSWORD_ENV }.into());
            }
            Password::with_theme(&theme)
                .with_prompt("Password")
                .interact()?
        }
    };

    let client = BushtalkClient::with_timeout(&config.tracker.api_url, config.tracker_timeout());
    let auth = client.authenticate(&username, &password).await?;

    let display_name = if auth.username.is_empty() {
        username.clone()
    } else {
        auth.username.clone()
    };
    output::success(&format!("Logged in as {display_name}"));

    if args.no_remember {
        output::note("Credentials were not saved");
        output::hint(&format!("export {API_TOKEN_ENV} to use this login with `run`"));
        return Ok(());
    }

    config.credentials.username = username;
    config.credentials.api_token = auth.id_token;
    config.save(&path)?;
    output::field("Saved to", path.display());

    Ok(())
}

fn prompt_username(theme: &ColorfulTheme, config: &Config) -> Result<String> {
    if output::is_json() {
        return Err(ConfigError::MissingField { field: "username" }.into());
    }

    let mut input = Input::<String>::with_theme(theme).with_prompt("Username");
    if !config.credentials.username.is_empty() {
        input = input.default(config.credentials.username.clone());
    }
    Ok(input.interact_text()?)
}
