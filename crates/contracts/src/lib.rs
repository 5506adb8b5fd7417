//! Types shared between the warehouse frontend and its REST API, plus the
//! pure list processing (filtering, summaries, fetch-error classification)
//! every page builds on.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
