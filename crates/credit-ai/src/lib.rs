//! Core decisioning library for the credit eligibility console.
//!
//! The `decisions` module owns the pure rule engine that turns remote scoring
//! model output into tiered, explainable lending decisions. Everything else in
//! this crate is the plumbing a deployed service needs around that engine:
//! environment configuration, telemetry bootstrap, and the shared error type
//! used by the HTTP surface.

pub mod config;
pub mod decisions;
pub mod error;
pub mod telemetry;
