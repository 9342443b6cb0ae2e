//! Runtime wiring for the tracking bridge.

pub mod runtime;

pub use runtime::{build_notifier_registry, run, run_with_shutdown};
