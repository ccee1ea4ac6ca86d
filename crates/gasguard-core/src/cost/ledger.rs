//! Ledger I/O and bandwidth cost.
//!
//! Five sub-dimensions are metered separately:
//!
//! | Sub-dimension  | Quantity             | Fee                                  |
//! |----------------|----------------------|--------------------------------------|
//! | read_entries   | read-only entries    | `entries * fee_read_ledger_entry`    |
//! | read_bytes     | bytes read           | `ceil(bytes/1024) * fee_read_1kb`    |
//! | write_entries  | read-write entries   | `entries * fee_write_ledger_entry`   |
//! | write_bytes    | bytes written        | `ceil(bytes/1024) * fee_write_1kb`   |
//! | bandwidth      | transaction size     | `ceil(bytes/1024) * fee_tx_size_1kb` |
//!
//! The normalized ledger cost is the weighted sum of the five utilizations,
//! using the snapshot's [`LedgerWeights`](crate::config::LedgerWeights).

use std::fmt;

use serde::{Deserialize, Serialize};

use gasguard_types::SimulationResult;

use super::BYTES_PER_FEE_UNIT;
use crate::config::ConfigSnapshot;
use crate::errors::{CostModelError, Result};

/// One of the five metered ledger quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerDimension {
    ReadEntries,
    ReadBytes,
    WriteEntries,
    WriteBytes,
    Bandwidth,
}

impl LedgerDimension {
    /// All sub-dimensions, in reporting order.
    pub const ALL: [LedgerDimension; 5] = [
        LedgerDimension::ReadEntries,
        LedgerDimension::ReadBytes,
        LedgerDimension::WriteEntries,
        LedgerDimension::WriteBytes,
        LedgerDimension::Bandwidth,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            LedgerDimension::ReadEntries => 0,
            LedgerDimension::ReadBytes => 1,
            LedgerDimension::WriteEntries => 2,
            LedgerDimension::WriteBytes => 3,
            LedgerDimension::Bandwidth => 4,
        }
    }

    /// Machine key used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            LedgerDimension::ReadEntries => "read_entries",
            LedgerDimension::ReadBytes => "read_bytes",
            LedgerDimension::WriteEntries => "write_entries",
            LedgerDimension::WriteBytes => "write_bytes",
            LedgerDimension::Bandwidth => "bandwidth",
        }
    }

    /// Human-readable label used in hints.
    pub fn label(self) -> &'static str {
        match self {
            LedgerDimension::ReadEntries => "read entry count",
            LedgerDimension::ReadBytes => "read byte volume",
            LedgerDimension::WriteEntries => "write entry count",
            LedgerDimension::WriteBytes => "write byte volume",
            LedgerDimension::Bandwidth => "transaction size",
        }
    }
}

impl fmt::Display for LedgerDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One value per ledger sub-dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerBreakdown {
    pub read_entries: f64,
    pub read_bytes: f64,
    pub write_entries: f64,
    pub write_bytes: f64,
    pub bandwidth: f64,
}

impl LedgerBreakdown {
    pub fn get(&self, dimension: LedgerDimension) -> f64 {
        match dimension {
            LedgerDimension::ReadEntries => self.read_entries,
            LedgerDimension::ReadBytes => self.read_bytes,
            LedgerDimension::WriteEntries => self.write_entries,
            LedgerDimension::WriteBytes => self.write_bytes,
            LedgerDimension::Bandwidth => self.bandwidth,
        }
    }

    /// `(dimension, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (LedgerDimension, f64)> + '_ {
        LedgerDimension::ALL
            .into_iter()
            .map(move |dim| (dim, self.get(dim)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, value)| value).sum()
    }

    fn from_fn(mut f: impl FnMut(LedgerDimension) -> f64) -> Self {
        Self {
            read_entries: f(LedgerDimension::ReadEntries),
            read_bytes: f(LedgerDimension::ReadBytes),
            write_entries: f(LedgerDimension::WriteEntries),
            write_bytes: f(LedgerDimension::WriteBytes),
            bandwidth: f(LedgerDimension::Bandwidth),
        }
    }
}

/// Ledger I/O and bandwidth cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerCost {
    /// Sum of the five sub-dimension fees
    pub fee: f64,
    /// Weighted sum of the five utilizations
    pub normalized: f64,
    /// Utilization of each per-transaction limit
    pub breakdown: LedgerBreakdown,
    /// Fee of each sub-dimension
    pub fee_breakdown: LedgerBreakdown,
}

/// Metered quantity of each sub-dimension.
fn quantity(sim: &SimulationResult, dimension: LedgerDimension) -> u64 {
    match dimension {
        LedgerDimension::ReadEntries => sim.read_entry_count(),
        LedgerDimension::ReadBytes => sim.read_bytes(),
        LedgerDimension::WriteEntries => sim.write_entry_count(),
        LedgerDimension::WriteBytes => sim.write_bytes(),
        LedgerDimension::Bandwidth => sim.transaction_size_bytes,
    }
}

fn tx_limit(config: &ConfigSnapshot, dimension: LedgerDimension) -> (&'static str, u64) {
    let limits = &config.limits;
    match dimension {
        LedgerDimension::ReadEntries => (
            "tx_max_read_ledger_entries",
            limits.tx_max_read_ledger_entries,
        ),
        LedgerDimension::ReadBytes => ("tx_max_read_bytes", limits.tx_max_read_bytes),
        LedgerDimension::WriteEntries => (
            "tx_max_write_ledger_entries",
            limits.tx_max_write_ledger_entries,
        ),
        LedgerDimension::WriteBytes => ("tx_max_write_bytes", limits.tx_max_write_bytes),
        LedgerDimension::Bandwidth => ("tx_max_size_bytes", limits.tx_max_size_bytes),
    }
}

fn fee(config: &ConfigSnapshot, dimension: LedgerDimension, quantity: u64) -> f64 {
    let fees = &config.fees;
    let per_kb = |bytes: u64, rate: f64| bytes.div_ceil(BYTES_PER_FEE_UNIT) as f64 * rate;
    match dimension {
        LedgerDimension::ReadEntries => quantity as f64 * fees.fee_read_ledger_entry,
        LedgerDimension::ReadBytes => per_kb(quantity, fees.fee_read_1kb),
        LedgerDimension::WriteEntries => quantity as f64 * fees.fee_write_ledger_entry,
        LedgerDimension::WriteBytes => per_kb(quantity, fees.fee_write_1kb),
        LedgerDimension::Bandwidth => per_kb(quantity, fees.fee_tx_size_1kb),
    }
}

/// Compute the ledger I/O and bandwidth cost of a simulation.
pub fn compute_ledger_cost(sim: &SimulationResult, config: &ConfigSnapshot) -> Result<LedgerCost> {
    for dimension in LedgerDimension::ALL {
        let (name, limit) = tx_limit(config, dimension);
        if limit == 0 {
            return Err(CostModelError::invalid_config(format!("{name} must be > 0")));
        }
    }

    if let Some(conflict) = sim.resources.footprint.find_conflict() {
        return Err(CostModelError::invalid_input(conflict.to_string()));
    }

    let breakdown = LedgerBreakdown::from_fn(|dim| {
        quantity(sim, dim) as f64 / tx_limit(config, dim).1 as f64
    });
    let fee_breakdown = LedgerBreakdown::from_fn(|dim| fee(config, dim, quantity(sim, dim)));

    let weights = &config.tuning.ledger_weights;
    let normalized: f64 = breakdown
        .iter()
        .map(|(dim, utilization)| weights.weight(dim) * utilization)
        .sum();
    let total_fee = fee_breakdown.sum();

    tracing::trace!(
        read_entries = sim.read_entry_count(),
        write_entries = sim.write_entry_count(),
        read_bytes = sim.read_bytes(),
        write_bytes = sim.write_bytes(),
        tx_size = sim.transaction_size_bytes,
        fee = total_fee,
        normalized = normalized,
        "cost: computed ledger"
    );

    Ok(LedgerCost {
        fee: total_fee,
        normalized,
        breakdown,
        fee_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasguard_types::{Footprint, SorobanResources};

    fn entries(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    fn ledger_sim(
        reads: usize,
        writes: usize,
        read_bytes: u64,
        write_bytes: u64,
        size: u64,
    ) -> SimulationResult {
        SimulationResult {
            instructions: 0,
            memory_bytes: 0,
            resources: SorobanResources {
                footprint: Footprint::new(entries("ro", reads), entries("rw", writes)),
                instructions: 0,
                read_bytes,
                write_bytes,
            },
            transaction_size_bytes: size,
        }
    }

    #[test]
    fn test_read_only_tx() {
        let config = ConfigSnapshot::mainnet();
        let cost = compute_ledger_cost(&ledger_sim(3, 0, 3000, 0, 1024), &config).unwrap();

        assert!((cost.breakdown.read_entries - 3.0 / 40.0).abs() < 1e-12);
        assert_eq!(cost.breakdown.write_entries, 0.0);
        assert!(cost.fee > 0.0);
        // 3 entries + 3 KiB read + 1 KiB envelope
        let expected = 3.0 * 0.0001 + 3.0 * 0.00005 + 1.0 * 0.00001;
        assert!((cost.fee - expected).abs() < 1e-12);
    }

    #[test]
    fn test_write_heavy_tx() {
        let config = ConfigSnapshot::mainnet();
        let cost = compute_ledger_cost(&ledger_sim(1, 4, 1000, 8000, 2048), &config).unwrap();

        assert!((cost.breakdown.write_entries - 4.0 / 25.0).abs() < 1e-12);
        assert!((cost.breakdown.write_bytes - 8000.0 / 100_000.0).abs() < 1e-12);
        // ceil(8000 / 1024) = 8 KiB written
        assert!((cost.fee_breakdown.write_bytes - 8.0 * 0.0001).abs() < 1e-12);
        assert!((cost.fee_breakdown.write_entries - 4.0 * 0.0002).abs() < 1e-12);
    }

    #[test]
    fn test_large_tx_size() {
        let config = ConfigSnapshot::mainnet();
        let cost = compute_ledger_cost(&ledger_sim(0, 0, 0, 0, 50_000), &config).unwrap();

        assert!((cost.breakdown.bandwidth - 0.5).abs() < 1e-12);
        // Only bandwidth contributes, weighted 0.2
        assert!((cost.normalized - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_fee_is_sum_of_breakdown() {
        let config = ConfigSnapshot::mainnet();
        let cost = compute_ledger_cost(&ledger_sim(6, 4, 45_000, 12_000, 18_000), &config).unwrap();
        assert!((cost.fee - cost.fee_breakdown.sum()).abs() < 1e-15);
    }

    #[test]
    fn test_empty_footprint_is_free() {
        let config = ConfigSnapshot::mainnet();
        let cost = compute_ledger_cost(&SimulationResult::zero(), &config).unwrap();
        assert_eq!(cost.fee, 0.0);
        assert_eq!(cost.normalized, 0.0);
        assert_eq!(cost.breakdown, LedgerBreakdown::default());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut config = ConfigSnapshot::mainnet();
        config.limits.tx_max_size_bytes = 0;
        let err = compute_ledger_cost(&SimulationResult::zero(), &config).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("tx_max_size_bytes"));
    }

    #[test]
    fn test_overlapping_footprint_rejected() {
        let config = ConfigSnapshot::mainnet();
        let mut sim = ledger_sim(1, 1, 0, 0, 0);
        sim.resources.footprint.read_write = vec!["ro0".to_string()];

        let err = compute_ledger_cost(&sim, &config).unwrap_err();
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("ro0"));
    }

    #[test]
    fn test_duplicate_read_only_key_rejected() {
        let config = ConfigSnapshot::mainnet();
        let mut sim = ledger_sim(0, 0, 0, 0, 0);
        sim.resources.footprint.read_only = vec!["k".to_string(), "k".to_string()];

        let err = compute_ledger_cost(&sim, &config).unwrap_err();
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("`k` is listed more than once"));
    }

    #[test]
    fn test_large_footprint_is_accepted() {
        let config = ConfigSnapshot::mainnet();
        let sim = ledger_sim(40_000, 40_000, 0, 0, 0);

        let cost = compute_ledger_cost(&sim, &config).unwrap();
        assert!((cost.breakdown.read_entries - 40_000.0 / 40.0).abs() < 1e-9);
        assert!((cost.breakdown.write_entries - 40_000.0 / 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_keys() {
        let keys: Vec<&str> = LedgerDimension::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(
            keys,
            ["read_entries", "read_bytes", "write_entries", "write_bytes", "bandwidth"]
        );
        assert_eq!(LedgerDimension::Bandwidth.to_string(), "bandwidth");
    }
}
