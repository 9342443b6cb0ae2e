//! Infrastructure: configuration, logging and process wiring.

pub mod config;
pub mod orchestration;
