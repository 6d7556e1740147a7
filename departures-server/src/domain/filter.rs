//! Line/direction filtering and ordering of departures.

use super::departure::Departure;

/// Optional equality filters taken from the request's query string.
///
/// Empty strings are treated the same as absent filters; [`matches`]
/// is the one place that decides this.
///
/// [`matches`]: DepartureFilter::matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureFilter {
    /// Raw line identifier; anything that doesn't parse as an integer
    /// matches nothing.
    pub line_id: Option<String>,

    /// Direction label, compared case-sensitively
    pub direction: Option<String>,
}

impl DepartureFilter {
    pub fn new(line_id: Option<String>, direction: Option<String>) -> Self {
        Self { line_id, direction }
    }

    /// Whether a departure passes both filters.
    pub fn matches(&self, departure: &Departure) -> bool {
        if let Some(line_id) = self.line_id.as_deref().filter(|s| !s.is_empty()) {
            match line_id.parse::<i64>() {
                Ok(id) if id == departure.line.id => {}
                _ => return false,
            }
        }

        if let Some(direction) = self.direction.as_deref().filter(|s| !s.is_empty())
            && departure.direction != direction
        {
            return false;
        }

        true
    }
}

/// Apply `filter` and return the survivors ordered by expected time.
///
/// The input is left untouched. Departures with equal expected times keep
/// their provider order.
pub fn filter_and_sort(departures: &[Departure], filter: &DepartureFilter) -> Vec<Departure> {
    let mut selected: Vec<Departure> = departures
        .iter()
        .filter(|d| filter.matches(d))
        .cloned()
        .collect();

    // `sort_by_key` is stable
    selected.sort_by_key(|d| d.expected);
    selected
}
