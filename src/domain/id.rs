//! Session-scoped dataref identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric handle X-Plane assigns to a dataref for the lifetime of one
/// simulator session.
///
/// Handles are not stable across simulator restarts, so they are resolved
/// again on every connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatarefId(i64);

impl DatarefId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for DatarefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Update frames key their values by the id rendered as a string.
impl FromStr for DatarefId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}
