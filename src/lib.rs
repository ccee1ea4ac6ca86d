//! GasGuard
//!
//! Resource-cost estimation and efficiency scoring for simulated smart-contract
//! executions:
//!
//! - **Cost model**: CPU, memory and ledger I/O fees and utilization
//! - **Scoring**: 0-100 efficiency score per dimension plus a weighted total
//! - **Hints**: severity-ranked optimization suggestions
//! - **Safety**: utilizations above the safety margin that should block deployment
//!
//! See [`core::analysis`] for the pipeline and [`types`] for the input format.

pub use gasguard_core as core;
pub use gasguard_types as types;

pub use gasguard_core::{
    analyze, analyze_at, load_config_snapshot, parse_simulation_result, Analysis, Analyzer,
    ConfigHandle, ConfigSnapshot, CostModelError,
};
pub use gasguard_types::SimulationResult;
