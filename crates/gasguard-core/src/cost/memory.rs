//! Memory footprint cost (limit-only, no fee).

use serde::{Deserialize, Serialize};

use gasguard_types::SimulationResult;

use crate::config::ConfigSnapshot;
use crate::errors::{CostModelError, Result};

/// Exponent applied to utilization in the memory penalty.
pub const MEMORY_PENALTY_EXPONENT: f64 = 5.0;

/// Memory cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryCost {
    /// Peak memory consumed, in bytes
    pub bytes_used: u64,
    /// Utilization of the per-transaction memory limit
    pub normalized: f64,
    /// Penalty score, k_mem * e^(5 * normalized)
    pub cost: f64,
}

/// Compute the memory cost of a simulation.
///
/// The penalty is negligible below half the limit and grows steeply above 80%.
pub fn compute_memory_cost(sim: &SimulationResult, config: &ConfigSnapshot) -> Result<MemoryCost> {
    let limit = config.limits.tx_memory_limit;
    let scaling = config.tuning.memory_scaling_factor;

    if limit == 0 {
        return Err(CostModelError::invalid_config("tx_memory_limit must be > 0"));
    }
    if !scaling.is_finite() || scaling < 0.0 {
        return Err(CostModelError::invalid_config(format!(
            "memory_scaling_factor must be a finite non-negative number, got {scaling}"
        )));
    }

    let bytes_used = sim.memory_bytes;
    let utilization = bytes_used as f64 / limit as f64;
    let cost = scaling * (MEMORY_PENALTY_EXPONENT * utilization).exp();

    if !cost.is_finite() {
        return Err(CostModelError::invalid_input(format!(
            "memory usage of {bytes_used} bytes ({utilization:.1}x the limit) overflows the penalty model"
        )));
    }

    tracing::trace!(
        bytes_used = bytes_used,
        utilization = utilization,
        cost = cost,
        "cost: computed memory"
    );

    Ok(MemoryCost {
        bytes_used,
        normalized: utilization,
        cost,
    })
}
