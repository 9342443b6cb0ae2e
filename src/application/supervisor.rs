//! Reconnect supervisor for telemetry sessions.
//!
//! Keeps one [`TelemetrySession`] alive until told to stop. Every attempt
//! uses a fresh session from the factory; after a failed attempt or a
//! dropped stream the supervisor waits a fixed delay before trying again so
//! it never spins against a simulator that is not running yet.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::current::CurrentSession;
use super::stopped;
use crate::port::{SessionFactory, TelemetrySession};

/// Default delay between connection attempts.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Drives session creation, connection and teardown.
pub struct ReconnectSupervisor<F: SessionFactory> {
    factory: F,
    current: Arc<CurrentSession<F::Session>>,
    delay: Duration,
}

impl<F: SessionFactory> ReconnectSupervisor<F> {
    #[must_use]
    pub fn new(factory: F, current: Arc<CurrentSession<F::Session>>, delay: Duration) -> Self {
        Self {
            factory,
            current,
            delay,
        }
    }

    /// Handle shared with readers of the live session.
    #[must_use]
    pub fn current(&self) -> Arc<CurrentSession<F::Session>> {
        Arc::clone(&self.current)
    }

    /// Run until `stop` becomes `true` or its sender is dropped.
    ///
    /// A connect call already in flight is not interrupted; stop is honoured
    /// as soon as it returns. The current session is cleared on exit.
    pub async fn run(&self, mut stop: watch::Receiver<bool>) {
        let mut attempt: u64 = 0;

        loop {
            if *stop.borrow() {
                break;
            }

            attempt += 1;
            let session = self.factory.create();
            self.current.replace(Arc::clone(&session));
            debug!(attempt, "Connecting to X-Plane");

            if let Err(e) = session.connect().await {
                warn!(
                    attempt,
                    error = %e,
                    delay_ms = self.delay.as_millis() as u64,
                    "Connection attempt failed"
                );
                if !self.pause(&mut stop).await {
                    break;
                }
                continue;
            }

            info!(attempt, "Telemetry session active");

            tokio::select! {
                biased;
                () = stopped(&mut stop) => {
                    debug!("Stop requested, disconnecting");
                    session.disconnect().await;
                    break;
                }
                () = session.ended() => {
                    warn!(
                        delay_ms = self.delay.as_millis() as u64,
                        "Telemetry session ended, reconnecting"
                    );
                    if !self.pause(&mut stop).await {
                        break;
                    }
                }
            }
        }

        self.current.clear();
        info!(attempts = attempt, "Reconnect supervisor stopped");
    }

    /// Wait out the retry delay. Returns `false` if stop fired first.
    async fn pause(&self, stop: &mut watch::Receiver<bool>) -> bool {
        tokio::select! {
            biased;
            () = stopped(stop) => false,
            () = sleep(self.delay) => true,
        }
    }
}
