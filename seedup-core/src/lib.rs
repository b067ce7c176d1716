//! Shared vocabulary for the SeedUp command dispatcher.
//!
//! Requests, reports, outcomes and the collaborator traits live here so the
//! CLI handlers can be driven by the real torrent and Drive engines or by
//! test doubles without any change to the dispatch logic.

pub mod error;
pub mod constants;
pub mod outcome;
pub mod request;
pub mod report;
pub mod traits;
