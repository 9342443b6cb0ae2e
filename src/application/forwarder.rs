//! Periodic position forwarding.
//!
//! Every tick reads the live session's snapshot, converts it to a
//! [`TrackRecord`] and publishes it. A tick with nothing to send is skipped
//! silently; a failed publish is reported and the next tick starts over
//! with a fresh snapshot.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::current::CurrentSession;
use super::stopped;
use crate::domain::TrackRecord;
use crate::port::{Event, NotifierRegistry, TelemetrySession, TrackPublisher};

/// Default time between position reports.
pub const DEFAULT_TRACK_INTERVAL: Duration = Duration::from_secs(5);

/// Why a tick published nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The supervisor has not created a session yet.
    NoSession,
    /// The current session is not streaming.
    NotConnected,
    /// No position has been received yet.
    NoPosition,
}

/// Result of a single forwarding tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Skipped(SkipReason),
    Sent(TrackRecord),
    Failed(String),
}

/// Publishes the live session's position on a fixed interval.
pub struct StateForwarder<S: TelemetrySession> {
    current: Arc<CurrentSession<S>>,
    publisher: Arc<dyn TrackPublisher>,
    notifiers: Arc<NotifierRegistry>,
    interval: Duration,
}

impl<S: TelemetrySession> StateForwarder<S> {
    #[must_use]
    pub fn new(
        current: Arc<CurrentSession<S>>,
        publisher: Arc<dyn TrackPublisher>,
        notifiers: Arc<NotifierRegistry>,
        interval: Duration,
    ) -> Self {
        Self {
            current,
            publisher,
            notifiers,
            interval,
        }
    }

    /// Forward the current snapshot once.
    pub async fn tick(&self) -> TickOutcome {
        let Some(session) = self.current.current() else {
            return TickOutcome::Skipped(SkipReason::NoSession);
        };
        if !session.is_connected() {
            return TickOutcome::Skipped(SkipReason::NotConnected);
        }

        let snapshot = session.snapshot();
        if !snapshot.is_valid() {
            return TickOutcome::Skipped(SkipReason::NoPosition);
        }

        let record = TrackRecord::from_state(&snapshot);
        self.notifiers.notify_all(Event::StateUpdated(snapshot));

        match self.publisher.send_position(&record).await {
            Ok(()) => {
                info!(
                    lat = record.latitude,
                    lon = record.longitude,
                    alt_ft = record.altitude_agl_ft,
                    speed_kts = record.groundspeed_kts,
                    heading = record.magnetic_heading,
                    tail = %record.tail_number,
                    on_ground = record.on_ground,
                    "Position sent"
                );
                self.notifiers.notify_all(Event::PositionSent { at: Utc::now() });
                TickOutcome::Sent(record)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(error = %reason, "Failed to send position");
                self.notifiers.notify_all(Event::PublishFailed {
                    reason: reason.clone(),
                });
                TickOutcome::Failed(reason)
            }
        }
    }

    /// Tick every interval until `stop` becomes `true` or its sender is dropped.
    ///
    /// The first tick fires one interval after start.
    pub async fn run(&self, mut stop: watch::Receiver<bool>) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                () = stopped(&mut stop) => break,
                _ = ticker.tick() => {
                    let outcome = self.tick().await;
                    if let TickOutcome::Skipped(reason) = outcome {
                        debug!(?reason, "Tick skipped");
                    }
                }
            }
        }

        debug!("State forwarder stopped");
    }
}
