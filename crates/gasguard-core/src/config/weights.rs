//! Validated weight groups and scoring thresholds.
//!
//! Each group is checked once, when it is constructed or deserialized, and is
//! immutable afterwards. Weights are never silently normalized: a group that
//! does not sum to 1.0 is rejected.

use serde::{Deserialize, Serialize};

use crate::cost::LedgerDimension;
use crate::errors::{CostModelError, Result};

/// Allowed deviation of a weight group's sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

fn check_weight_group(group: &str, named: &[(&str, f64)]) -> Result<()> {
    for (name, weight) in named {
        if !weight.is_finite() || *weight < 0.0 {
            return Err(CostModelError::invalid_config(format!(
                "{group} weight `{name}` must be a finite non-negative number, got {weight}"
            )));
        }
    }
    let sum: f64 = named.iter().map(|(_, w)| w).sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(CostModelError::invalid_config(format!(
            "{group} weights must sum to 1.0 (tolerance {WEIGHT_SUM_TOLERANCE}), got {sum}"
        )));
    }
    Ok(())
}

/// Weights of the five ledger sub-dimensions in the composite ledger utilization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LedgerWeightsRepr", into = "LedgerWeightsRepr")]
pub struct LedgerWeights([f64; 5]);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LedgerWeightsRepr {
    read_entries: f64,
    read_bytes: f64,
    write_entries: f64,
    write_bytes: f64,
    bandwidth: f64,
}

impl LedgerWeights {
    /// Build from weights in [`LedgerDimension::ALL`] order.
    pub fn new(weights: [f64; 5]) -> Result<Self> {
        let named: Vec<(&str, f64)> = LedgerDimension::ALL
            .iter()
            .zip(weights)
            .map(|(dim, w)| (dim.key(), w))
            .collect();
        check_weight_group("ledger", &named)?;
        Ok(Self(weights))
    }

    /// Equal weight (0.2) for every sub-dimension.
    pub fn uniform() -> Self {
        Self([0.2; 5])
    }

    pub fn weight(&self, dimension: LedgerDimension) -> f64 {
        self.0[dimension.index()]
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.0
    }
}

impl Default for LedgerWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl TryFrom<LedgerWeightsRepr> for LedgerWeights {
    type Error = CostModelError;

    fn try_from(repr: LedgerWeightsRepr) -> Result<Self> {
        Self::new([
            repr.read_entries,
            repr.read_bytes,
            repr.write_entries,
            repr.write_bytes,
            repr.bandwidth,
        ])
    }
}

impl From<LedgerWeights> for LedgerWeightsRepr {
    fn from(weights: LedgerWeights) -> Self {
        let [read_entries, read_bytes, write_entries, write_bytes, bandwidth] = weights.0;
        Self {
            read_entries,
            read_bytes,
            write_entries,
            write_bytes,
            bandwidth,
        }
    }
}

/// Weights of the per-dimension scores in the aggregate score.
///
/// Defaults to cpu 0.4, memory 0.2, ledger 0.4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoreWeightsRepr", into = "ScoreWeightsRepr")]
pub struct ScoreWeights {
    cpu: f64,
    memory: f64,
    ledger: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreWeightsRepr {
    cpu: f64,
    memory: f64,
    ledger: f64,
}

impl ScoreWeights {
    pub fn new(cpu: f64, memory: f64, ledger: f64) -> Result<Self> {
        check_weight_group(
            "score",
            &[("cpu", cpu), ("memory", memory), ("ledger", ledger)],
        )?;
        Ok(Self {
            cpu,
            memory,
            ledger,
        })
    }

    pub fn cpu(&self) -> f64 {
        self.cpu
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn ledger(&self) -> f64 {
        self.ledger
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cpu: 0.4,
            memory: 0.2,
            ledger: 0.4,
        }
    }
}

impl TryFrom<ScoreWeightsRepr> for ScoreWeights {
    type Error = CostModelError;

    fn try_from(repr: ScoreWeightsRepr) -> Result<Self> {
        Self::new(repr.cpu, repr.memory, repr.ledger)
    }
}

impl From<ScoreWeights> for ScoreWeightsRepr {
    fn from(weights: ScoreWeights) -> Self {
        Self {
            cpu: weights.cpu,
            memory: weights.memory,
            ledger: weights.ledger,
        }
    }
}

/// Utilization thresholds separating the three score bands.
///
/// Must satisfy `0 < low < high < 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScoringThresholdsRepr", into = "ScoringThresholdsRepr")]
pub struct ScoringThresholds {
    low: f64,
    high: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoringThresholdsRepr {
    low: f64,
    high: f64,
}

impl ScoringThresholds {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite() && 0.0 < low && low < high && high < 1.0) {
            return Err(CostModelError::invalid_config(format!(
                "scoring thresholds must satisfy 0 < low < high < 1, got low={low} high={high}"
            )));
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            low: 0.5,
            high: 0.8,
        }
    }
}

impl TryFrom<ScoringThresholdsRepr> for ScoringThresholds {
    type Error = CostModelError;

    fn try_from(repr: ScoringThresholdsRepr) -> Result<Self> {
        Self::new(repr.low, repr.high)
    }
}

impl From<ScoringThresholds> for ScoringThresholdsRepr {
    fn from(thresholds: ScoringThresholds) -> Self {
        Self {
            low: thresholds.low,
            high: thresholds.high,
        }
    }
}
