//! Efficiency scoring.
//!
//! Utilization is mapped to a 0-100 score by a piecewise-linear function with
//! three bands:
//!
//! | Band      | Utilization      | Score     |
//! |-----------|------------------|-----------|
//! | Excellent | `[0, low)`       | 100 -> 80 |
//! | Good      | `[low, high)`    | 80 -> 50  |
//! | Poor      | `[high, inf)`    | 50 -> 0 at u = 1.0, negative beyond |
//!
//! The raw signed value is kept in [`RawScores`] for regression comparisons;
//! reported [`Scores`] are clamped to `[0, 100]`.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigSnapshot, ScoringThresholds};
use crate::cost::{CpuCost, LedgerCost, MemoryCost};

/// Absorbs representation error when truncating raw scores, so that a value
/// like 54.999999999999996 for an exact 55 is not reported as 54.
const SCORE_FLOOR_TOLERANCE: f64 = 1e-9;

/// Score band of a utilization value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Poor,
}

impl ScoreBand {
    pub fn for_utilization(utilization: f64, thresholds: &ScoringThresholds) -> Self {
        if utilization < thresholds.low() {
            ScoreBand::Excellent
        } else if utilization < thresholds.high() {
            ScoreBand::Good
        } else {
            ScoreBand::Poor
        }
    }
}

/// Raw (signed, unclamped) score of one utilization value.
///
/// Continuous at both thresholds and non-increasing in `utilization`.
pub fn score_dimension(utilization: f64, thresholds: &ScoringThresholds) -> f64 {
    let low = thresholds.low();
    let high = thresholds.high();
    match ScoreBand::for_utilization(utilization, thresholds) {
        ScoreBand::Excellent => 100.0 - (utilization / low) * 20.0,
        ScoreBand::Good => 80.0 - ((utilization - low) / (high - low)) * 30.0,
        ScoreBand::Poor => 50.0 - ((utilization - high) / (1.0 - high)) * 50.0,
    }
}

/// Reported score: clamped to `[0, 100]` and truncated.
pub fn display_score(raw: f64) -> u8 {
    let clamped = raw.clamp(0.0, 100.0);
    (clamped + SCORE_FLOOR_TOLERANCE).floor().min(100.0) as u8
}

/// Reported scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub cpu: u8,
    pub memory: u8,
    pub ledger: u8,
    pub total: u8,
}

/// Signed per-dimension scores before clamping.
///
/// Values below zero mean the limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawScores {
    pub cpu: f64,
    pub memory: f64,
    pub ledger: f64,
}

/// Score the three cost dimensions and their weighted aggregate.
///
/// The aggregate weighs the clamped raw dimension scores and rounds to the
/// nearest integer, so truncation of each dimension does not compound.
pub fn compute_scores(
    cpu: &CpuCost,
    memory: &MemoryCost,
    ledger: &LedgerCost,
    config: &ConfigSnapshot,
) -> (Scores, RawScores) {
    let thresholds = &config.tuning.thresholds;
    let weights = &config.tuning.score_weights;

    let raw = RawScores {
        cpu: score_dimension(cpu.normalized, thresholds),
        memory: score_dimension(memory.normalized, thresholds),
        ledger: score_dimension(ledger.normalized, thresholds),
    };

    let weighted = weights.cpu() * raw.cpu.clamp(0.0, 100.0)
        + weights.memory() * raw.memory.clamp(0.0, 100.0)
        + weights.ledger() * raw.ledger.clamp(0.0, 100.0);
    let total = weighted.round().clamp(0.0, 100.0) as u8;

    let scores = Scores {
        cpu: display_score(raw.cpu),
        memory: display_score(raw.memory),
        ledger: display_score(raw.ledger),
        total,
    };

    tracing::trace!(
        cpu = raw.cpu,
        memory = raw.memory,
        ledger = raw.ledger,
        total = total,
        "scoring: computed scores"
    );

    (scores, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> ScoringThresholds {
        ScoringThresholds::default()
    }

    fn score(u: f64) -> u8 {
        display_score(score_dimension(u, &thresholds()))
    }

    #[test]
    fn test_zero_utilization_scores_100() {
        assert_eq!(score_dimension(0.0, &thresholds()), 100.0);
        assert_eq!(score(0.0), 100);
    }

    #[test]
    fn test_band_examples() {
        // 10% -> 96, 60% -> 70, 90% -> 25, 100% -> 0
        assert!((95..=100).contains(&score(0.1)));
        assert!((65..=75).contains(&score(0.6)));
        assert!((20..=30).contains(&score(0.9)));
        assert_eq!(score(1.0), 0);
    }

    #[test]
    fn test_exact_band_values() {
        assert_eq!(score(0.0125), 99);
        assert_eq!(score(0.75), 55);
        assert_eq!(score(0.5), 80);
        assert_eq!(score(0.8), 50);
    }

    #[test]
    fn test_continuous_at_thresholds() {
        let t = thresholds();
        let eps = 1e-9;
        for boundary in [t.low(), t.high()] {
            let below = score_dimension(boundary - eps, &t);
            let at = score_dimension(boundary, &t);
            assert!((below - at).abs() < 1e-6, "jump at {boundary}");
        }
    }

    #[test]
    fn test_monotonic() {
        let t = thresholds();
        let mut prev = f64::INFINITY;
        for step in 0..=1000 {
            let u = step as f64 / 1000.0;
            let s = score_dimension(u, &t);
            assert!(s <= prev, "score increased at u={u}");
            prev = s;
        }
    }

    #[test]
    fn test_over_limit_goes_negative_but_displays_zero() {
        let raw = score_dimension(1.2, &thresholds());
        assert!(raw < 0.0);
        assert_eq!(display_score(raw), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = ScoringThresholds::new(0.4, 0.9).unwrap();
        assert!((score_dimension(0.4, &t) - 80.0).abs() < 1e-9);
        assert!((score_dimension(0.9, &t) - 50.0).abs() < 1e-9);
        assert!((score_dimension(0.95, &t) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_band() {
        let t = thresholds();
        assert_eq!(ScoreBand::for_utilization(0.1, &t), ScoreBand::Excellent);
        assert_eq!(ScoreBand::for_utilization(0.5, &t), ScoreBand::Good);
        assert_eq!(ScoreBand::for_utilization(0.8, &t), ScoreBand::Poor);
    }

    #[test]
    fn test_aggregate_uses_weights() {
        let config = ConfigSnapshot::mainnet();
        let cpu = CpuCost {
            fee: 0.0,
            normalized: 0.75,
            pressure: 0.0,
            total: 0.0,
        };
        let memory = MemoryCost {
            bytes_used: 0,
            normalized: 0.0,
            cost: 100.0,
        };
        let ledger = LedgerCost {
            fee: 0.0,
            normalized: 0.0,
            breakdown: Default::default(),
            fee_breakdown: Default::default(),
        };

        let (scores, raw) = compute_scores(&cpu, &memory, &ledger, &config);
        assert_eq!(scores.cpu, 55);
        assert_eq!(scores.memory, 100);
        assert_eq!(scores.ledger, 100);
        // 0.4 * 55 + 0.2 * 100 + 0.4 * 100
        assert_eq!(scores.total, 82);
        assert!((raw.cpu - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_clamps_negative_dimensions() {
        let config = ConfigSnapshot::mainnet();
        let cpu = CpuCost {
            fee: 0.0,
            normalized: 3.0,
            pressure: 0.0,
            total: 0.0,
        };
        let memory = MemoryCost {
            bytes_used: 0,
            normalized: 0.0,
            cost: 100.0,
        };
        let ledger = LedgerCost {
            fee: 0.0,
            normalized: 0.0,
            breakdown: Default::default(),
            fee_breakdown: Default::default(),
        };

        let (scores, raw) = compute_scores(&cpu, &memory, &ledger, &config);
        assert!(raw.cpu < 0.0);
        assert_eq!(scores.cpu, 0);
        assert_eq!(scores.total, 60);
    }
}
