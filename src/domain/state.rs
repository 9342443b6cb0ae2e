//! Latest known aircraft state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tail number used when the simulator reports nothing usable.
pub const UNKNOWN_TAIL: &str = "UNKNOWN";

/// Aircraft position and motion as last reported by the simulator.
///
/// Values are in simulator units. Conversion to the units the tracking
/// service expects happens in [`TrackRecord`](super::track::TrackRecord).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Meters above ground level.
    pub altitude_agl: f64,
    /// Meters per second.
    pub groundspeed: f64,
    /// Degrees magnetic.
    pub magnetic_heading: f64,
    pub tail_number: String,
    /// When the last update frame was applied.
    pub updated_at: Option<DateTime<Utc>>,
}

impl AircraftState {
    /// Whether position data has ever been received.
    ///
    /// The all-zero position stands for "never received", so a state is
    /// valid as soon as either coordinate is non-zero.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}
