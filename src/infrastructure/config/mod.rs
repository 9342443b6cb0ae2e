//! Infrastructure configuration modules.

pub mod logging;
pub mod settings;

pub use logging::LoggingConfig;
pub use settings::{
    Config, CredentialsConfig, SimulatorConfig, TimingConfig, TrackerConfig, API_TOKEN_ENV,
};
