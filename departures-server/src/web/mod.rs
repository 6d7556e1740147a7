//! Web layer for the departures proxy.
//!
//! Two endpoints over the same fetch, filter and sort pipeline: a plain-text
//! report and a JSON array.

mod dto;
mod report;
mod routes;
mod state;

pub use dto::DeparturesQuery;
pub use report::{DepartureLine, DeparturesReport};
pub use routes::{AppError, create_router};
pub use state::AppState;
