//! GasGuard Core - resource-cost and efficiency-scoring engine.
//!
//! Given the resource consumption of a simulated contract execution, this
//! crate computes fee estimates, utilization against network limits, a 0-100
//! efficiency score per dimension, severity-ranked optimization hints and
//! safety-margin violations.
//!
//! ## Modules
//!
//! - [`config`]: network limits, fees and tuning as an immutable
//!   [`ConfigSnapshot`], plus the swappable [`ConfigHandle`]
//! - [`cost`]: CPU, memory and ledger cost calculators
//! - [`scoring`]: utilization to score mapping and the weighted aggregate
//! - [`hints`]: the hint rule table
//! - [`safety`]: safety-margin checks
//! - [`analysis`]: the end-to-end pipeline and the parallel [`Analyzer`]
//! - [`errors`]: [`CostModelError`]
//!
//! Every computation is a pure function of a simulation and an explicitly
//! passed snapshot; nothing here holds global state.

pub mod analysis;
pub mod config;
pub mod cost;
pub mod errors;
pub mod hints;
pub mod safety;
pub mod scoring;

pub use analysis::{analyze, analyze_at, parse_simulation_result, Analysis, Analyzer};
pub use config::{load_config_snapshot, ConfigHandle, ConfigSnapshot};
pub use cost::ResourceCosts;
pub use errors::{CostModelError, Result};
pub use hints::{Hint, Severity};
pub use safety::SafetyViolation;
pub use scoring::{RawScores, Scores};
