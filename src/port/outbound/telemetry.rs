//! Telemetry port for simulator sessions.
//!
//! A [`TelemetrySession`] is one lifetime of a streaming connection to the
//! simulator. Sessions are shared between the supervisor, which drives their
//! lifecycle, and the forwarder, which reads snapshots, so every method takes
//! `&self`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::AircraftState;
use crate::error::Result;

/// One streaming connection to the simulator.
///
/// # Lifecycle
///
/// `connect` resolves datarefs, dials, subscribes and starts reading. Once
/// it returns `Ok`, [`ended`](Self::ended) completes when the stream drops
/// or [`disconnect`](Self::disconnect) is called. A session is never
/// reconnected; the supervisor creates a new one instead.
#[async_trait]
pub trait TelemetrySession: Send + Sync + 'static {
    /// Resolve, dial and subscribe.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails; the session never becomes
    /// connected in that case.
    async fn connect(&self) -> Result<()>;

    /// Tear the session down. Safe to call at any point, repeatedly.
    async fn disconnect(&self);

    /// Completes once the session has ended.
    async fn ended(&self);

    /// Whether the session is currently streaming.
    fn is_connected(&self) -> bool;

    /// Immutable copy of the latest aircraft state.
    fn snapshot(&self) -> AircraftState;
}

/// Creates fresh sessions for each connection attempt.
pub trait SessionFactory: Send + Sync {
    type Session: TelemetrySession;

    fn create(&self) -> Arc<Self::Session>;
}

impl<F: SessionFactory + ?Sized> SessionFactory for Arc<F> {
    type Session = F::Session;

    fn create(&self) -> Arc<Self::Session> {
        (**self).create()
    }
}
