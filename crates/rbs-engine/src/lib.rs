//! Risk-based surveillance scoring for air operator oversight.
//!
//! The crate centers on a pure, side-effect-free scoring pipeline: an
//! operator snapshot goes in, a derived [`oversight::ScoreResult`] comes out.
//! Everything around it (repository trait, service, HTTP router) is thin
//! plumbing so the engine can be hosted without owning any state itself.

pub mod config;
pub mod error;
pub mod oversight;
pub mod telemetry;
