//! Client for the transit provider's departures API.
//!
//! One GET per call, decoded straight into the domain model. There is no
//! retry and no caching; every request to this service results in exactly
//! one upstream request.

mod client;
mod error;

pub use client::{DEFAULT_URL_TEMPLATE, SITE_ID_PLACEHOLDER, UpstreamClient, UpstreamConfig};
pub use error::UpstreamError;
