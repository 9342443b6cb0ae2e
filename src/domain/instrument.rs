//! The fixed set of X-Plane datarefs the bridge tracks.

use std::collections::HashMap;
use std::fmt;

use super::id::DatarefId;

/// A simulator value the bridge subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Latitude,
    Longitude,
    /// Height above ground level, meters.
    AltitudeAgl,
    /// Ground speed, meters per second.
    Groundspeed,
    /// Magnetic heading, degrees.
    MagneticHeading,
    TailNumber,
}

impl Instrument {
    /// Every required instrument, in resolution and subscription order.
    pub const ALL: [Instrument; 6] = [
        Instrument::Latitude,
        Instrument::Longitude,
        Instrument::AltitudeAgl,
        Instrument::Groundspeed,
        Instrument::MagneticHeading,
        Instrument::TailNumber,
    ];

    /// The X-Plane dataref name for this instrument.
    #[must_use]
    pub const fn dataref(self) -> &'static str {
        match self {
            Self::Latitude => "sim/flightmodel/position/latitude",
            Self::Longitude => "sim/flightmodel/position/longitude",
            Self::AltitudeAgl => "sim/flightmodel/position/y_agl",
            Self::Groundspeed => "sim/flightmodel/position/groundspeed",
            Self::MagneticHeading => "sim/flightmodel/position/mag_psi",
            Self::TailNumber => "sim/aircraft/view/acf_tailnum",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataref())
    }
}

/// Instrument → dataref id mapping for one simulator session.
///
/// Only ever built complete: the resolver returns either a map with every
/// entry of [`Instrument::ALL`] or an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentMap {
    ids: HashMap<Instrument, DatarefId>,
}

impl InstrumentMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, instrument: Instrument, id: DatarefId) {
        self.ids.insert(instrument, id);
    }

    #[must_use]
    pub fn get(&self, instrument: Instrument) -> Option<DatarefId> {
        self.ids.get(&instrument).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in [`Instrument::ALL`] order, skipping anything unresolved.
    #[must_use]
    pub fn ids(&self) -> Vec<DatarefId> {
        Instrument::ALL
            .into_iter()
            .filter_map(|i| self.get(i))
            .collect()
    }

    /// Id → instrument mapping used to interpret update frames.
    #[must_use]
    pub fn reverse(&self) -> HashMap<DatarefId, Instrument> {
        self.ids.iter().map(|(name, id)| (*id, *name)).collect()
    }
}

impl FromIterator<(Instrument, DatarefId)> for InstrumentMap {
    fn from_iter<T: IntoIterator<Item = (Instrument, DatarefId)>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
