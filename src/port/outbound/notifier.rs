//! Notifier port for connection and tracking events.
//!
//! The tracking loop reports what it is doing through [`Event`]s rather than
//! raw callbacks, so any number of observers (log output, the status file,
//! a UI) can subscribe without the core knowing about them.

use chrono::{DateTime, Utc};

use crate::domain::AircraftState;

/// Events emitted by the telemetry session and the forwarder.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A telemetry session subscribed successfully and is streaming.
    Connected,
    /// The active telemetry session ended.
    Disconnected,
    /// A valid snapshot was read for publishing.
    StateUpdated(AircraftState),
    /// A position report was accepted by the tracking service.
    PositionSent {
        /// When the report was accepted.
        at: DateTime<Utc>,
    },
    /// A position report was rejected or could not be delivered.
    PublishFailed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Trait for notification handlers.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `notify` is called from the session read task and the forwarder task;
///   it must return quickly and never block on I/O for long
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{debug, info, warn};
        match event {
            Event::Connected => info!("X-Plane connected"),
            Event::Disconnected => info!("X-Plane disconnected"),
            Event::StateUpdated(state) => {
                debug!(
                    lat = state.latitude,
                    lon = state.longitude,
                    tail = %state.tail_number,
                    "Position updated"
                );
            }
            Event::PositionSent { at } => debug!(at = %at, "Position sent"),
            Event::PublishFailed { reason } => warn!(reason = %reason, "Position not sent"),
        }
    }
}
