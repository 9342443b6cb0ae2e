//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`session`] - Scripted [`TelemetrySession`](crate::port::TelemetrySession)
//!   and [`SessionFactory`](crate::port::SessionFactory) implementations.
//! - [`publisher`] - A [`TrackPublisher`](crate::port::TrackPublisher) that
//!   records what it was asked to send.
//! - [`notifier`] - A [`Notifier`](crate::port::Notifier) that records events.

pub mod notifier;
pub mod publisher;
pub mod session;
