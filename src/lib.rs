//! Bushtalk Bridge - X-Plane 12 telemetry to Bushtalk Radio flight tracking.
//!
//! Streams the aircraft position from X-Plane's local web API and reports it
//! to the Bushtalk Radio tracking service on a fixed interval.
//!
//! # Architecture
//!
//! - **`domain`** - Instruments, aircraft state and the outbound track record
//! - **`port`** - Seams: telemetry sessions, track publishing, notifications
//! - **`adapter::outbound::xplane`** - Dataref resolution and the WebSocket session
//! - **`adapter::outbound::bushtalk`** - Bushtalk Radio REST client
//! - **`adapter::outbound::notifier`** - Status file writer
//! - **`adapter::inbound::cli`** - Command-line interface
//! - **`application`** - Reconnect supervisor and state forwarder
//! - **`infrastructure`** - Configuration, logging and runtime wiring
//!
//! # Example
//!
//! ```no_run
//! use bushtalk_bridge::infrastructure::config::Config;
//! use bushtalk_bridge::infrastructure::orchestration;
//!
//! # async fn example() -> bushtalk_bridge::error::Result<()> {
//! let config = Config::load(Config::default_path()?)?;
//! orchestration::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
