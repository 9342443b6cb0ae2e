//! Outbound track record in tracking-service units.

use super::state::AircraftState;

/// Meters to feet.
pub const METERS_TO_FEET: f64 = 3.28084;

/// Meters per second to knots.
pub const MPS_TO_KNOTS: f64 = 1.94384;

/// Below this height above ground (meters) the aircraft counts as on the ground.
pub const ON_GROUND_BELOW_M: f64 = 1.0;

/// Position report derived from an [`AircraftState`].
///
/// Built fresh for every publish and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_agl_ft: f64,
    pub groundspeed_kts: f64,
    pub magnetic_heading: f64,
    pub tail_number: String,
    pub on_ground: bool,
}

impl TrackRecord {
    #[must_use]
    pub fn from_state(state: &AircraftState) -> Self {
        Self {
            latitude: state.latitude,
            longitude: state.longitude,
            altitude_agl_ft: state.altitude_agl * METERS_TO_FEET,
            groundspeed_kts: state.groundspeed * MPS_TO_KNOTS,
            magnetic_heading: state.magnetic_heading,
            tail_number: state.tail_number.clone(),
            on_ground: state.altitude_agl < ON_GROUND_BELOW_M,
        }
    }
}

impl From<&AircraftState> for TrackRecord {
    fn from(state: &AircraftState) -> Self {
        Self::from_state(state)
    }
}
