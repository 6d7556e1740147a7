//! Departure records as delivered by the transit provider.

use serde::{Deserialize, Serialize};

use super::time::Timestamp;

/// A transit line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Provider-assigned numeric identifier
    pub id: i64,

    /// Human-readable route label (e.g. "14" or "Red")
    pub designation: String,
}

/// One scheduled departure from a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Departure {
    pub destination: String,

    /// Provider-defined direction label
    pub direction: String,

    #[serde(with = "super::time::wire")]
    pub scheduled: Timestamp,

    /// Expected time, later than `scheduled` when the vehicle runs late
    #[serde(with = "super::time::wire")]
    pub expected: Timestamp,

    pub line: Line,
}

impl Departure {
    /// Delay in whole minutes, if the expected time differs from the
    /// scheduled one at minute granularity.
    ///
    /// Early running yields a negative value.
    pub fn delay_minutes(&self) -> Option<i64> {
        if self.scheduled.hh_mm() == self.expected.hh_mm() {
            None
        } else {
            Some(self.expected.minutes_since(self.scheduled))
        }
    }
}

/// Upstream payload for a site's departures, in provider order.
#[derive(Debug, Clone, Deserialize)]
pub struct DeparturesResponse {
    pub departures: Vec<Departure>,
}
