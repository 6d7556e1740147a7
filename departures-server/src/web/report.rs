//! Plain-text departures report.

use askama::Template;

use crate::domain::Departure;

/// Text report for `GET /departures`.
#[derive(Template)]
#[template(path = "departures.txt")]
pub struct DeparturesReport<'a> {
    pub site_id: &'a str,
    pub departures: Vec<DepartureLine>,
}

impl<'a> DeparturesReport<'a> {
    /// Build a report from departures that are already filtered and sorted.
    pub fn new(site_id: &'a str, departures: &[Departure]) -> Self {
        Self {
            site_id,
            departures: departures.iter().map(DepartureLine::from_departure).collect(),
        }
    }
}

/// One departure block, with times pre-formatted as `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureLine {
    pub designation: String,
    pub line_id: i64,
    pub destination: String,
    pub direction: String,
    pub scheduled: String,
    pub expected: String,
    pub delay_minutes: Option<i64>,
}

impl DepartureLine {
    pub fn from_departure(d: &Departure) -> Self {
        Self {
            designation: d.line.designation.clone(),
            line_id: d.line.id,
            destination: d.destination.clone(),
            direction: d.direction.clone(),
            scheduled: d.scheduled.hh_mm(),
            expected: d.expected.hh_mm(),
            delay_minutes: d.delay_minutes(),
        }
    }
}
