//! Safety-margin checks.
//!
//! A dimension whose utilization is strictly above the margin is a violation.
//! Violations block deployment independently of the score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::{CpuCost, LedgerCost, LedgerDimension, MemoryCost};

/// A resource dimension checked against the safety margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyDimension {
    Cpu,
    Memory,
    Ledger(LedgerDimension),
}

impl fmt::Display for SafetyDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyDimension::Cpu => f.write_str("CPU"),
            SafetyDimension::Memory => f.write_str("Memory"),
            SafetyDimension::Ledger(dimension) => write!(f, "Ledger {dimension}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SafetyViolation {
    pub dimension: SafetyDimension,
    pub utilization: f64,
    pub margin: f64,
}

impl fmt::Display for SafetyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {:.1}% exceeds {:.0}% safety margin",
            self.dimension,
            self.utilization * 100.0,
            self.margin * 100.0
        )
    }
}

/// Check CPU, memory and every ledger sub-dimension against `margin`.
///
/// A utilization exactly equal to the margin passes.
pub fn check_safety(
    cpu: &CpuCost,
    memory: &MemoryCost,
    ledger: &LedgerCost,
    margin: f64,
) -> Vec<SafetyViolation> {
    let dimensions = [
        (SafetyDimension::Cpu, cpu.normalized),
        (SafetyDimension::Memory, memory.normalized),
    ]
    .into_iter()
    .chain(
        ledger
            .breakdown
            .iter()
            .map(|(dim, u)| (SafetyDimension::Ledger(dim), u)),
    );

    dimensions
        .filter(|&(_, utilization)| utilization > margin)
        .map(|(dimension, utilization)| SafetyViolation {
            dimension,
            utilization,
            margin,
        })
        .collect()
}
