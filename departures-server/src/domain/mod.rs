//! Domain types for the departures proxy.
//!
//! Departure records, the timestamp codec they are decoded with, and the
//! filter/sort step applied before rendering.

mod departure;
mod filter;
mod time;

pub use departure::{Departure, DeparturesResponse, Line};
pub use filter::{DepartureFilter, filter_and_sort};
pub use time::{
    FormatError, Timestamp, decode_quoted, encode_quoted, format_timestamp, parse_timestamp, wire,
};
