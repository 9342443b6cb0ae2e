//! Application configuration loading, validation and persistence.
//!
//! Provides the main [`Config`] struct. Configuration is a TOML file in the
//! platform config directory; a missing file means defaults. The API token
//! can be supplied through `BUSHTALK_API_TOKEN` instead of being stored.
//!
//! # Example
//!
//! ```no_run
//! use bushtalk_bridge::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = Config::default_path()?;
//!     let config = Config::load(&path)?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::xplane::SessionConfig;
use crate::application::forwarder::DEFAULT_TRACK_INTERVAL;
use crate::application::supervisor::DEFAULT_RECONNECT_DELAY;
use crate::error::{ConfigError, Result};

/// Environment variable that overrides the stored API token.
pub const API_TOKEN_ENV: &str = "BUSHTALK_API_TOKEN";

const APP_DIR: &str = "bushtalk-bridge";
const CONFIG_FILE: &str = "config.toml";

/// X-Plane web API location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub host: String,
    pub port: u16,
    /// Per-request timeout for dataref lookup.
    pub resolve_timeout_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8086,
            resolve_timeout_ms: 5_000,
        }
    }
}

/// Bushtalk Radio API location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub api_url: String,
    pub timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://bushtalkradio.com".into(),
            timeout_ms: 10_000,
        }
    }
}

/// Stored login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: String,
    pub api_token: String,
}

/// Loop timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between connection attempts.
    pub reconnect_delay_ms: u64,
    /// Time between position reports.
    pub track_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reconnect_delay_ms: millis(DEFAULT_RECONNECT_DELAY),
            track_interval_ms: millis(DEFAULT_TRACK_INTERVAL),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where to write the JSON status file. Disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_file: Option<PathBuf>,

    #[serde(default)]
    pub simulator: SimulatorConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// `<config dir>/bushtalk-bridge/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the platform has no config directory.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply `BUSHTALK_API_TOKEN`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is malformed,
    /// or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = match fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::parse_toml(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(ConfigError::ReadFile(e).into()),
        };
        config.apply_token_override(std::env::var(API_TOKEN_ENV).ok());
        Ok(config)
    }

    /// Replace the stored token with `token` when it is non-blank.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token {
            let token = token.trim();
            if !token.is_empty() {
                self.credentials.api_token = token.to_string();
            }
        }
    }

    /// Write the configuration as TOML, creating the parent directory.
    ///
    /// On unix the file is readable by its owner only, since it may hold a token.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFile)?;
        }
        write_private(path, content.as_bytes()).map_err(ConfigError::WriteFile)?;

        Ok(())
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first missing or out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if self.simulator.host.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "simulator.host",
            }
            .into());
        }
        if self.simulator.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulator.port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.tracker.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "tracker.api_url",
            }
            .into());
        }
        let url = Url::parse(&self.tracker.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "tracker.api_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "tracker.api_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }

        for (field, value) in [
            ("simulator.resolve_timeout_ms", self.simulator.resolve_timeout_ms),
            ("tracker.timeout_ms", self.tracker.timeout_ms),
            ("timing.reconnect_delay_ms", self.timing.reconnect_delay_ms),
            ("timing.track_interval_ms", self.timing.track_interval_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Both a username and a token are stored.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.credentials.username.is_empty() && !self.credentials.api_token.is_empty()
    }

    pub fn clear_credentials(&mut self) {
        self.credentials = CredentialsConfig::default();
    }

    /// Endpoints for the configured simulator.
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::for_simulator(
            &self.simulator.host,
            self.simulator.port,
            Duration::from_millis(self.simulator.resolve_timeout_ms),
        )
    }

    #[must_use]
    pub fn tracker_timeout(&self) -> Duration {
        Duration::from_millis(self.tracker.timeout_ms)
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.timing.reconnect_delay_ms)
    }

    #[must_use]
    pub fn track_interval(&self) -> Duration {
        Duration::from_millis(self.timing.track_interval_ms)
    }
}

/// Write `content` readable by the owner only. New files are created with
/// mode 0600; an existing file is narrowed to 0600 before any byte lands.
#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content)
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    fs::write(path, content)
}
