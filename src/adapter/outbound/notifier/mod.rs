//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for various notification backends.

pub mod status;

pub use status::{StatusConfig, StatusFile, StatusWriter};
