//! Configuration and simulator diagnostic command handlers.

pub mod config;
pub mod simulator;
