//! Simulator-agnostic domain types.

mod id;
mod instrument;
mod state;
mod track;

pub use id::DatarefId;
pub use instrument::{Instrument, InstrumentMap};
pub use state::{AircraftState, UNKNOWN_TAIL};
pub use track::{TrackRecord, METERS_TO_FEET, MPS_TO_KNOTS, ON_GROUND_BELOW_M};
