//! Transit departures proxy.
//!
//! Fetches the departures for a site from the transit provider, optionally
//! filters them by line and direction, orders them by expected time and
//! serves them as plain text or JSON.

pub mod config;
pub mod domain;
pub mod upstream;
pub mod web;
