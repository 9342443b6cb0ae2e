//! Application services (use cases).
//!
//! These services drive the ports: the supervisor keeps a telemetry session
//! alive and the forwarder republishes whatever that session last saw.

pub mod current;
pub mod forwarder;
pub mod supervisor;

pub use current::CurrentSession;
pub use forwarder::{SkipReason, StateForwarder, TickOutcome};
pub use supervisor::ReconnectSupervisor;

use tokio::sync::watch;

/// Completes once stop is requested or the stop sender is dropped.
pub(crate) async fn stopped(stop: &mut watch::Receiver<bool>) {
    let _ = stop.wait_for(|stop| *stop).await;
}
