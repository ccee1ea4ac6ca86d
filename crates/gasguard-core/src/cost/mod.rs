//! Per-dimension resource cost calculators.
//!
//! Each calculator is a pure function of a [`SimulationResult`] and a
//! [`ConfigSnapshot`] and produces one immutable cost value. The three
//! calculators share no data, so they can run in any order.
//!
//! # Cost Model
//!
//! 1. **CPU** - fee per started instruction increment, plus a quadratic
//!    ledger-pressure surcharge:
//!    ```text
//!    fee      = ceil(I / R_cpu) * F_cpu
//!    pressure = (I / I_ledger)^2
//!    total    = fee * (1 + w_ledger * pressure)
//!    ```
//! 2. **Memory** - limit-only, no fee. Exponential penalty that is negligible
//!    below 50% utilization and severe above 80%:
//!    ```text
//!    cost = k_mem * e^(5 * M / M_tx)
//!    ```
//! 3. **Ledger** - per-entry and per-KiB fees for reads, writes and the
//!    transaction envelope; the normalized value is the weighted sum of the
//!    five sub-dimension utilizations.
//!
//! Utilization may exceed 1.0 when a limit is exceeded; calculators report it
//! as is and leave judgement to the scorer and safety checker.
//!
//! [`SimulationResult`]: gasguard_types::SimulationResult
//! [`ConfigSnapshot`]: crate::config::ConfigSnapshot

mod cpu;
mod ledger;
mod memory;

pub use cpu::{compute_cpu_cost, CpuCost};
pub use ledger::{compute_ledger_cost, LedgerBreakdown, LedgerCost, LedgerDimension};
pub use memory::{compute_memory_cost, MemoryCost, MEMORY_PENALTY_EXPONENT};

use serde::{Deserialize, Serialize};

/// Bytes per fee unit for byte-metered quantities.
pub const BYTES_PER_FEE_UNIT: u64 = 1024;

/// The three cost values computed for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCosts {
    pub cpu: CpuCost,
    pub memory: MemoryCost,
    pub ledger: LedgerCost,
}
