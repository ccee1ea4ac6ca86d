//! Shared types for the gasguard workspace.
//!
//! This crate holds the input contract produced by the external simulation
//! collaborator (a Soroban RPC `simulateTransaction` call, or anything that
//! speaks the same JSON shape). It has no knowledge of fees or scoring, so it
//! can be depended on by producers without pulling in the cost engine.
//!
//! ## Simulation Types
//!
//! The [`simulation`] module contains:
//! - [`SimulationResult`](simulation::SimulationResult) - One simulated execution
//! - [`SorobanResources`](simulation::SorobanResources) - Declared resources of the execution
//! - [`Footprint`](simulation::Footprint) - Ledger entries read or written
//! - [`FootprintConflict`](simulation::FootprintConflict) - A duplicated or overlapping key

pub mod simulation;

pub use simulation::{Footprint, FootprintConflict, SimulationResult, SorobanResources};
