//! Outbound adapters (driven side).

pub mod bushtalk;
pub mod notifier;
pub mod xplane;
