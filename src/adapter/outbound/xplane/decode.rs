//! Decoding of X-Plane update frames into [`AircraftState`].

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::domain::{AircraftState, DatarefId, Instrument, UNKNOWN_TAIL};

/// Raw shapes the tail-number dataref arrives in.
///
/// X-Plane exposes `acf_tailnum` as a byte array, which the web API sends
/// either as a base64 string or as an array of character codes.
#[derive(Debug, Clone, PartialEq)]
pub enum TailValue {
    /// Base64 of the raw bytes, or already plain text.
    Text(String),
    /// Character codes, zero-terminated.
    Codes(Vec<Value>),
    /// Anything else.
    Other,
}

impl From<&Value> for TailValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::Codes(items.clone()),
            _ => Self::Other,
        }
    }
}

impl TailValue {
    /// Decode to a display tail number. Never fails; falls back to
    /// [`UNKNOWN_TAIL`].
    #[must_use]
    pub fn decode(&self) -> String {
        match self {
            Self::Text(text) => decode_text(text),
            Self::Codes(codes) => decode_codes(codes),
            Self::Other => UNKNOWN_TAIL.to_string(),
        }
    }
}

fn decode_text(text: &str) -> String {
    match BASE64.decode(text) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(decoded) => clean_tail_number(&decoded),
            Err(_) => clean_tail_number(text),
        },
        Err(_) => clean_tail_number(text),
    }
}

fn decode_codes(codes: &[Value]) -> String {
    let mut bytes = Vec::with_capacity(codes.len());
    for code in codes {
        let Some(n) = code.as_f64() else {
            continue;
        };
        if n == 0.0 {
            break;
        }
        if n.fract() != 0.0 || !(1.0..=255.0).contains(&n) {
            debug!(code = n, "Tail number code out of byte range");
            return UNKNOWN_TAIL.to_string();
        }
        bytes.push(n as u8);
    }
    clean_tail_number(&String::from_utf8_lossy(&bytes))
}

/// Strip NULs and surrounding whitespace.
fn clean_tail_number(raw: &str) -> String {
    let cleaned = raw.replace('\0', "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        UNKNOWN_TAIL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Apply one update frame to `state`.
///
/// Every recognised entry overwrites its field; fields missing from the
/// frame keep their previous value. Keys that are not numeric or not
/// subscribed are ignored. The timestamp is refreshed once per frame.
///
/// Returns the number of fields written.
pub fn apply_update(
    state: &mut AircraftState,
    reverse: &HashMap<DatarefId, Instrument>,
    data: &Map<String, Value>,
    now: DateTime<Utc>,
) -> usize {
    let mut applied = 0;

    for (key, value) in data {
        let Ok(id) = key.parse::<DatarefId>() else {
            trace!(key = %key, "Ignoring non-numeric dataref key");
            continue;
        };
        let Some(instrument) = reverse.get(&id) else {
            trace!(id = %id, "Ignoring unsubscribed dataref");
            continue;
        };

        let field = match instrument {
            Instrument::Latitude => &mut state.latitude,
            Instrument::Longitude => &mut state.longitude,
            Instrument::AltitudeAgl => &mut state.altitude_agl,
            Instrument::Groundspeed => &mut state.groundspeed,
            Instrument::MagneticHeading => &mut state.magnetic_heading,
            Instrument::TailNumber => {
                state.tail_number = TailValue::from(value).decode();
                applied += 1;
                continue;
            }
        };

        match value.as_f64() {
            Some(v) => {
                *field = v;
                applied += 1;
            }
            None => trace!(dataref = %instrument, "Ignoring non-numeric value"),
        }
    }

    state.updated_at = Some(now);
    applied
}
