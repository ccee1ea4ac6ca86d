//! CPU instruction cost.

use serde::{Deserialize, Serialize};

use gasguard_types::SimulationResult;

use crate::config::ConfigSnapshot;
use crate::errors::{CostModelError, Result};

/// CPU cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuCost {
    /// Instruction fee, ceil(I / R_cpu) * F_cpu
    pub fee: f64,
    /// Utilization of the per-transaction instruction limit
    pub normalized: f64,
    /// Squared utilization of the per-ledger instruction limit
    pub pressure: f64,
    /// Fee including the ledger-pressure surcharge; never below `fee`
    pub total: f64,
}

impl CpuCost {
    /// Utilization of the per-ledger instruction limit.
    pub fn ledger_utilization(&self) -> f64 {
        self.pressure.sqrt()
    }
}

/// Compute the CPU cost of a simulation.
///
/// Pressure is quadratic so it stays negligible below roughly 30% of the
/// shared per-ledger budget and grows sharply near saturation.
pub fn compute_cpu_cost(sim: &SimulationResult, config: &ConfigSnapshot) -> Result<CpuCost> {
    let limits = &config.limits;
    let fees = &config.fees;
    let pressure_weight = config.tuning.ledger_pressure_weight;

    if fees.instructions_per_fee_increment == 0 {
        return Err(CostModelError::invalid_config(
            "instructions_per_fee_increment must be > 0",
        ));
    }
    if limits.tx_max_instructions == 0 {
        return Err(CostModelError::invalid_config(
            "tx_max_instructions must be > 0",
        ));
    }
    if limits.ledger_max_instructions == 0 {
        return Err(CostModelError::invalid_config(
            "ledger_max_instructions must be > 0",
        ));
    }
    if !pressure_weight.is_finite() || pressure_weight < 0.0 {
        return Err(CostModelError::invalid_config(format!(
            "ledger_pressure_weight must be a finite non-negative number, got {pressure_weight}"
        )));
    }

    let instructions = sim.instructions;
    let increments = instructions.div_ceil(fees.instructions_per_fee_increment);
    let fee = increments as f64 * fees.fee_per_instruction_increment;

    let utilization_tx = instructions as f64 / limits.tx_max_instructions as f64;
    let utilization_ledger = instructions as f64 / limits.ledger_max_instructions as f64;
    let pressure = utilization_ledger * utilization_ledger;

    let total = fee * (1.0 + pressure_weight * pressure);

    tracing::trace!(
        instructions = instructions,
        increments = increments,
        fee = fee,
        utilization_tx = utilization_tx,
        pressure = pressure,
        total = total,
        "cost: computed cpu"
    );

    Ok(CpuCost {
        fee,
        normalized: utilization_tx,
        pressure,
        total,
    })
}
