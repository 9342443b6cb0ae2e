//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the tracking loop and the outside world:
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  supervisor, forwarder  │
//!                    └─────────────────────────┘
//!                      │          │          │
//!                      ▼          ▼          ▼
//!               ┌──────────┐ ┌─────────┐ ┌──────────┐
//!               │ X-Plane  │ │Bushtalk │ │ Notifier │
//!               │ session  │ │ client  │ │ adapters │
//!               └──────────┘ └─────────┘ └──────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`TelemetrySession`], [`SessionFactory`] - Simulator telemetry
//! - [`TrackPublisher`] - Position reports to the tracking service
//! - [`Notifier`] - Connection, position and publish events

pub mod outbound;

pub use outbound::notifier::{Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier};
pub use outbound::telemetry::{SessionFactory, TelemetrySession};
pub use outbound::tracker::TrackPublisher;
