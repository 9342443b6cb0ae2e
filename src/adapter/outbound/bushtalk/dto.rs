//! Bushtalk Radio API request and response types.

use serde::{Deserialize, Serialize};

use crate::domain::TrackRecord;

/// `POST /api/authenticate` request body.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /api/authenticate` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// `POST /api/track` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPayload {
    #[serde(rename = "PLANE_LATITUDE")]
    pub latitude: f64,
    #[serde(rename = "PLANE_LONGITUDE")]
    pub longitude: f64,
    /// Feet.
    #[serde(rename = "ALTITUDE_ABOVE_GROUND")]
    pub altitude_agl: f64,
    /// Knots.
    #[serde(rename = "GROUND_VELOCITY")]
    pub ground_velocity: f64,
    #[serde(rename = "MAGNETIC_COMPASS")]
    pub heading: f64,
    #[serde(rename = "ATC_ID")]
    pub tail_number: String,
    #[serde(rename = "SIM_ON_GROUND")]
    pub on_ground: bool,
}

impl From<&TrackRecord> for TrackPayload {
    fn from(record: &TrackRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            altitude_agl: record.altitude_agl_ft,
            ground_velocity: record.groundspeed_kts,
            heading: record.magnetic_heading,
            tail_number: record.tail_number.clone(),
            on_ground: record.on_ground,
        }
    }
}
