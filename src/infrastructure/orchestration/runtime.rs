//! Tracking runtime lifecycle.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use crate::adapter::outbound::bushtalk::BushtalkClient;
use crate::adapter::outbound::notifier::{StatusConfig, StatusWriter};
use crate::adapter::outbound::xplane::XPlaneSessionFactory;
use crate::application::{CurrentSession, ReconnectSupervisor, StateForwarder};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;
use crate::port::{LogNotifier, NotifierRegistry, TrackPublisher};

/// Notifiers for a run: log output, plus the status file when configured.
#[must_use]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    if let Some(path) = &config.status_file {
        info!(path = %path.display(), "Status file enabled");
        registry.register(Box::new(StatusWriter::new(
            path.clone(),
            StatusConfig {
                simulator: format!("{}:{}", config.simulator.host, config.simulator.port),
                api_url: config.tracker.api_url.clone(),
            },
        )));
    }

    registry
}

/// Run until Ctrl-C.
///
/// # Errors
///
/// Returns an error if no API token is configured.
pub async fn run(config: Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        shutdown_tx.send_replace(true);
    });

    run_with_shutdown(config, shutdown_rx).await
}

/// Run the supervisor and forwarder until `shutdown` becomes `true`.
///
/// # Errors
///
/// Returns an error if no API token is configured.
pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
    if config.credentials.api_token.is_empty() {
        return Err(ConfigError::MissingField {
            field: "credentials.api_token",
        }
        .into());
    }

    let notifiers = Arc::new(build_notifier_registry(&config));
    info!(notifiers = notifiers.len(), "Notifiers initialized");

    let client = BushtalkClient::with_timeout(&config.tracker.api_url, config.tracker_timeout());
    client.set_token(config.credentials.api_token.clone());
    let publisher: Arc<dyn TrackPublisher> = Arc::new(client);

    let current = Arc::new(CurrentSession::new());
    let factory = XPlaneSessionFactory::new(config.session_config(), Arc::clone(&notifiers));
    let supervisor = ReconnectSupervisor::new(factory, Arc::clone(&current), config.reconnect_delay());
    let forwarder = StateForwarder::new(current, publisher, notifiers, config.track_interval());

    info!(
        simulator = %format!("{}:{}", config.simulator.host, config.simulator.port),
        api_url = %config.tracker.api_url,
        username = %config.credentials.username,
        "Starting bushtalk-bridge"
    );

    tokio::join!(supervisor.run(shutdown.clone()), forwarder.run(shutdown));

    info!("bushtalk-bridge stopped");
    Ok(())
}
