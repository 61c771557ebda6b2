//! Candidate-site generation, multi-criteria scoring, and ranking for
//! subsidized-housing siting.
//!
//! Hosts resolve addresses, zoning, and population statistics elsewhere and
//! hand the pre-computed feature values to [`workflows::siting`]. The crate
//! performs no network or file I/O of its own apart from the optional
//! `.env` lookup in [`config::SitingConfig::load`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
