//! Status file for external monitoring.
//!
//! Writes a JSON status file that the `status` command (or any other tool)
//! can poll to see whether X-Plane is connected, where the aircraft is and
//! when a position was last accepted by the tracking service.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AircraftState, TrackRecord};
use crate::error::Result;
use crate::port::{Event, Notifier};

/// Current status file format version.
const STATUS_VERSION: &str = "1";

/// Top-level status file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusFile {
    /// Schema version for forward compatibility.
    pub version: String,
    /// When the process started.
    pub started_at: DateTime<Utc>,
    /// Process ID.
    pub pid: u32,
    /// Static configuration snapshot.
    pub config: StatusConfig,
    /// Whether a telemetry session is currently streaming.
    pub simulator_connected: bool,
    /// Last valid position, in display units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionStatus>,
    /// When the tracking service last accepted a report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sent_at: Option<DateTime<Utc>>,
    /// Most recent publish failure, cleared by the next success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// When this file was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Static configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Simulator web API address (`host:port`).
    pub simulator: String,
    /// Tracking service base URL.
    pub api_url: String,
}

/// Aircraft position as shown to the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStatus {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_agl_ft: f64,
    pub groundspeed_kts: f64,
    pub heading: f64,
    pub tail_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&AircraftState> for PositionStatus {
    fn from(state: &AircraftState) -> Self {
        let record = TrackRecord::from_state(state);
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            altitude_agl_ft: record.altitude_agl_ft,
            groundspeed_kts: record.groundspeed_kts,
            heading: record.magnetic_heading,
            tail_number: record.tail_number,
            updated_at: state.updated_at,
        }
    }
}

impl StatusFile {
    /// Read a status file written by [`StatusWriter`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Writer for the status file.
///
/// Thread-safe wrapper that applies events to the in-memory status and
/// rewrites the file atomically after each one.
pub struct StatusWriter {
    /// Path to write the status file.
    path: PathBuf,
    /// Current status state.
    status: Mutex<StatusFile>,
}

impl StatusWriter {
    #[must_use]
    pub fn new(path: PathBuf, config: StatusConfig) -> Self {
        let now = Utc::now();
        let status = StatusFile {
            version: STATUS_VERSION.to_string(),
            started_at: now,
            pid: std::process::id(),
            config,
            simulator_connected: false,
            position: None,
            last_sent_at: None,
            last_error: None,
            updated_at: now,
        };

        Self {
            path,
            status: Mutex::new(status),
        }
    }

    /// Copy of the in-memory status.
    #[must_use]
    pub fn current(&self) -> StatusFile {
        self.status.lock().clone()
    }

    /// Write the current status to disk atomically.
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn write(&self) -> Result<()> {
        let mut status = self.status.lock();
        self.persist(&mut status)
    }

    /// Apply `event` and persist under the same lock.
    fn record(&self, event: Event) -> Result<()> {
        let mut status = self.status.lock();
        status.apply(event);
        self.persist(&mut status)
    }

    /// Caller holds the status lock for the whole write + rename.
    fn persist(&self, status: &mut StatusFile) -> Result<()> {
        status.updated_at = Utc::now();
        let json = serde_json::to_string_pretty(&*status)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;

        let cleanup_and_err = |e| {
            let _ = fs::remove_file(&temp_path);
            e
        };

        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        Ok(())
    }
}

impl StatusFile {
    fn apply(&mut self, event: Event) {
        match event {
            Event::Connected => self.simulator_connected = true,
            Event::Disconnected => self.simulator_connected = false,
            Event::StateUpdated(state) => self.position = Some(PositionStatus::from(&state)),
            Event::PositionSent { at } => {
                self.last_sent_at = Some(at);
                self.last_error = None;
            }
            Event::PublishFailed { reason } => self.last_error = Some(reason),
        }
    }
}

impl Notifier for StatusWriter {
    fn notify(&self, event: Event) {
        if let Err(e) = self.record(event) {
            warn!(error = %e, path = %self.path.display(), "Failed to write status file");
        }
    }
}
