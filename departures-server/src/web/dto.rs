//! Query parameters accepted by the departures endpoints.

use crate::domain::DepartureFilter;

const SITE_ID_PARAM: &str = "siteId";
const LINE_ID_PARAM: &str = "lineId";
const DIRECTION_PARAM: &str = "direction";

/// Query string of `/departures` and `/departures/json`.
#[derive(Debug, Default)]
pub struct DeparturesQuery {
    /// Provider site identifier (required, but checked by the handler)
    pub site_id: Option<String>,

    /// Only departures of this line; must be an integer to match anything
    pub line_id: Option<String>,

    /// Only departures with exactly this direction label
    pub direction: Option<String>,
}

impl DeparturesQuery {
    /// Build from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                SITE_ID_PARAM => &mut query.site_id,
                LINE_ID_PARAM => &mut query.line_id,
                DIRECTION_PARAM => &mut query.direction,
                _ => continue,
            };
            slot.get_or_insert(value);
        }

        query
    }

    /// The site identifier, if present and non-empty.
    pub fn site_id(&self) -> Option<&str> {
        self.site_id.as_deref().filter(|s| !s.is_empty())
    }

    /// Consume the query into its filter part.
    pub fn into_filter(self) -> DepartureFilter {
        DepartureFilter::new(self.line_id, self.direction)
    }
}
