//! Handler for the `status` command.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::adapter::inbound::cli::command::{Cli, StatusArgs};
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::notifier::StatusFile;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Print the status file written by a running bridge.
pub fn execute(cli: &Cli, args: &StatusArgs) -> Result<()> {
    let path = status_path(cli, args)?;
    let status = StatusFile::read(&path)?;

    if output::is_json() {
        output::document(&serde_json::to_value(&status)?);
        return Ok(());
    }

    display(&status, Utc::now());
    Ok(())
}

fn status_path(cli: &Cli, args: &StatusArgs) -> Result<PathBuf> {
    if let Some(path) = &args.file {
        return Ok(path.clone());
    }

    let config = Config::load(cli.config_path()?)?;
    config.status_file.ok_or_else(|| {
        output::hint("set `status_file` in the configuration or pass --file");
        ConfigError::MissingField {
            field: "status_file",
        }
        .into()
    })
}

fn display(status: &StatusFile, now: DateTime<Utc>) {
    output::header(env!("CARGO_PKG_VERSION"));

    let simulator = if status.simulator_connected {
        output::positive("connected")
    } else {
        output::negative("disconnected")
    };
    output::field(
        "X-Plane",
        format!("{simulator} {}", output::muted(&status.config.simulator)),
    );
    output::field("Tracker", &status.config.api_url);
    output::field("PID", status.pid);
    output::field("Started", format_age(status.started_at, now));

    output::section("Position");
    match &status.position {
        Some(position) => {
            output::field("Tail", &position.tail_number);
            output::field(
                "Lat/Lon",
                format!("{:.5}, {:.5}", position.latitude, position.longitude),
            );
            output::field("Altitude", format!("{:.0} ft AGL", position.altitude_agl_ft));
            output::field("Speed", format!("{:.0} kts", position.groundspeed_kts));
            output::field("Heading", format!("{:.0}°", position.heading));
        }
        None => output::note("No position received yet"),
    }

    output::section("Tracking");
    match status.last_sent_at {
        Some(at) => output::field("Last sent", format_age(at, now)),
        None => output::field("Last sent", output::muted("never")),
    }
    if let Some(error) = &status.last_error {
        output::warning(&format!("Last publish failed: {error}"));
    }
    output::field("Updated", format_age(status.updated_at, now));
}

/// `HH:MM:SS (Ns ago)` in UTC.
fn format_age(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds().max(0);
    let ago = match secs {
        0..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        _ => format!("{}h ago", secs / 3600),
    };
    format!("{} ({ago})", at.format("%H:%M:%S UTC"))
}
