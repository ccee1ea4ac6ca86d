//! Network configuration snapshots.
//!
//! A [`ConfigSnapshot`] holds every network limit, fee rate and tunable weight
//! for one configuration epoch. It is produced by an external collaborator
//! (the network-config fetcher), held read-only for the epoch, and replaced
//! wholesale on refresh through a [`ConfigHandle`]. Nothing in this crate
//! mutates a snapshot in place.
//!
//! # Sources
//!
//! - [`ConfigSnapshot::mainnet`]: reference mainnet values (also `Default`)
//! - [`ConfigSnapshot::from_json_str`] / [`load_config_snapshot`]: a JSON
//!   snapshot on disk, validated before it is returned
//!
//! # Example
//!
//! ```
//! use gasguard_core::config::ConfigSnapshot;
//!
//! let config = ConfigSnapshot::mainnet();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.limits.tx_max_instructions, 100_000_000);
//! ```

mod handle;
mod weights;

pub use handle::ConfigHandle;
pub use weights::{LedgerWeights, ScoreWeights, ScoringThresholds, WEIGHT_SUM_TOLERANCE};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CostModelError, Result};

/// Version tag of the built-in mainnet preset.
pub const MAINNET_CONFIG_VERSION: &str = "mainnet-v20";

/// Default weight of ledger pressure in the CPU total cost.
pub const DEFAULT_LEDGER_PRESSURE_WEIGHT: f64 = 0.5;

/// Default scale of the exponential memory penalty.
pub const DEFAULT_MEMORY_SCALING_FACTOR: f64 = 100.0;

/// Default utilization above which a dimension blocks deployment.
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.95;

/// Hard resource limits, per transaction and per ledger.
///
/// Every field must be strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLimits {
    // ========== Compute ==========
    /// Instructions a single transaction may consume (I_tx)
    pub tx_max_instructions: u64,
    /// Instructions all transactions in one ledger may consume (I_ledger)
    pub ledger_max_instructions: u64,
    /// Memory a single transaction may consume, in bytes (M_tx)
    pub tx_memory_limit: u64,

    // ========== Ledger I/O, per transaction ==========
    pub tx_max_read_ledger_entries: u64,
    pub tx_max_read_bytes: u64,
    pub tx_max_write_ledger_entries: u64,
    pub tx_max_write_bytes: u64,

    // ========== Ledger I/O, per ledger ==========
    pub ledger_max_read_ledger_entries: u64,
    pub ledger_max_read_bytes: u64,
    pub ledger_max_write_ledger_entries: u64,
    pub ledger_max_write_bytes: u64,

    // ========== Bandwidth ==========
    /// Maximum encoded transaction size, in bytes
    pub tx_max_size_bytes: u64,
    /// Maximum combined transaction size in one ledger, in bytes
    pub ledger_max_txs_size_bytes: u64,
}

impl NetworkLimits {
    fn named(&self) -> [(&'static str, u64); 13] {
        [
            ("tx_max_instructions", self.tx_max_instructions),
            ("ledger_max_instructions", self.ledger_max_instructions),
            ("tx_memory_limit", self.tx_memory_limit),
            ("tx_max_read_ledger_entries", self.tx_max_read_ledger_entries),
            ("tx_max_read_bytes", self.tx_max_read_bytes),
            ("tx_max_write_ledger_entries", self.tx_max_write_ledger_entries),
            ("tx_max_write_bytes", self.tx_max_write_bytes),
            ("ledger_max_read_ledger_entries", self.ledger_max_read_ledger_entries),
            ("ledger_max_read_bytes", self.ledger_max_read_bytes),
            ("ledger_max_write_ledger_entries", self.ledger_max_write_ledger_entries),
            ("ledger_max_write_bytes", self.ledger_max_write_bytes),
            ("tx_max_size_bytes", self.tx_max_size_bytes),
            ("ledger_max_txs_size_bytes", self.ledger_max_txs_size_bytes),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.named() {
            require_positive_limit(name, value)?;
        }
        Ok(())
    }
}

/// Fee rates, denominated in the network's native token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Instructions covered by one fee increment (R_cpu); must be > 0
    pub instructions_per_fee_increment: u64,
    /// Fee charged per instruction increment (F_cpu)
    pub fee_per_instruction_increment: f64,
    pub fee_read_ledger_entry: f64,
    pub fee_write_ledger_entry: f64,
    /// Fee per started KiB read
    pub fee_read_1kb: f64,
    /// Fee per started KiB written
    pub fee_write_1kb: f64,
    /// Fee per started KiB of transaction envelope
    pub fee_tx_size_1kb: f64,
}

impl FeeSchedule {
    pub fn validate(&self) -> Result<()> {
        require_positive_limit(
            "instructions_per_fee_increment",
            self.instructions_per_fee_increment,
        )?;
        for (name, fee) in [
            ("fee_per_instruction_increment", self.fee_per_instruction_increment),
            ("fee_read_ledger_entry", self.fee_read_ledger_entry),
            ("fee_write_ledger_entry", self.fee_write_ledger_entry),
            ("fee_read_1kb", self.fee_read_1kb),
            ("fee_write_1kb", self.fee_write_1kb),
            ("fee_tx_size_1kb", self.fee_tx_size_1kb),
        ] {
            require_non_negative(name, fee)?;
        }
        Ok(())
    }
}

/// Tunable internal parameters of the cost and scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTuning {
    /// Weight of ledger pressure in the CPU total (w_ledger)
    pub ledger_pressure_weight: f64,
    /// Scale of the exponential memory penalty (k_mem)
    pub memory_scaling_factor: f64,
    pub ledger_weights: LedgerWeights,
    pub thresholds: ScoringThresholds,
    pub score_weights: ScoreWeights,
    /// Utilization above which a dimension is a safety violation
    pub safety_margin: f64,
}

impl CostTuning {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("ledger_pressure_weight", self.ledger_pressure_weight)?;
        require_non_negative("memory_scaling_factor", self.memory_scaling_factor)?;
        if !self.safety_margin.is_finite() || self.safety_margin <= 0.0 {
            return Err(CostModelError::invalid_config(format!(
                "safety_margin must be a finite number > 0, got {}",
                self.safety_margin
            )));
        }
        Ok(())
    }
}

impl Default for CostTuning {
    fn default() -> Self {
        Self {
            ledger_pressure_weight: DEFAULT_LEDGER_PRESSURE_WEIGHT,
            memory_scaling_factor: DEFAULT_MEMORY_SCALING_FACTOR,
            ledger_weights: LedgerWeights::default(),
            thresholds: ScoringThresholds::default(),
            score_weights: ScoreWeights::default(),
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

/// All limits, fees and weights for one configuration epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Version tag carried into every analysis for traceability
    pub version: String,
    pub limits: NetworkLimits,
    pub fees: FeeSchedule,
    #[serde(default)]
    pub tuning: CostTuning,
}

impl ConfigSnapshot {
    /// Assemble and validate a snapshot.
    pub fn new(
        version: impl Into<String>,
        limits: NetworkLimits,
        fees: FeeSchedule,
        tuning: CostTuning,
    ) -> Result<Self> {
        let snapshot = Self {
            version: version.into(),
            limits,
            fees,
            tuning,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Reference mainnet limits and fees with default tuning.
    pub fn mainnet() -> Self {
        Self {
            version: MAINNET_CONFIG_VERSION.to_string(),
            limits: NetworkLimits {
                tx_max_instructions: 100_000_000,
                ledger_max_instructions: 1_000_000_000,
                tx_memory_limit: 41_943_040,

                tx_max_read_ledger_entries: 40,
                tx_max_read_bytes: 200_000,
                tx_max_write_ledger_entries: 25,
                tx_max_write_bytes: 100_000,

                ledger_max_read_ledger_entries: 20_000,
                ledger_max_read_bytes: 100_000_000,
                ledger_max_write_ledger_entries: 10_000,
                ledger_max_write_bytes: 50_000_000,

                tx_max_size_bytes: 100_000,
                ledger_max_txs_size_bytes: 1_000_000,
            },
            fees: FeeSchedule {
                instructions_per_fee_increment: 10_000,
                fee_per_instruction_increment: 0.00001,
                fee_read_ledger_entry: 0.0001,
                fee_write_ledger_entry: 0.0002,
                fee_read_1kb: 0.00005,
                fee_write_1kb: 0.0001,
                fee_tx_size_1kb: 0.00001,
            },
            tuning: CostTuning::default(),
        }
    }

    /// Same snapshot under a different version tag.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Same snapshot with different tuning.
    pub fn with_tuning(mut self, tuning: CostTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Check every invariant of the snapshot.
    ///
    /// Weight groups and thresholds are already guaranteed by their types;
    /// this covers limits, fees and scalar tuning values.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(CostModelError::invalid_config("version tag must not be empty"));
        }
        self.limits.validate()?;
        self.fees.validate()?;
        self.tuning.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json).map_err(|e| {
            CostModelError::invalid_config(format!("failed to parse config snapshot: {e}"))
        })?;
        snapshot.validate()?;
        tracing::debug!(version = %snapshot.version, "config: parsed snapshot");
        Ok(snapshot)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Load and validate a JSON snapshot from disk.
pub fn load_config_snapshot(path: &Path) -> Result<ConfigSnapshot> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        CostModelError::invalid_config(format!(
            "failed to read config snapshot {}: {e}",
            path.display()
        ))
    })?;
    ConfigSnapshot::from_json_str(&json)
}

fn require_positive_limit(name: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(CostModelError::invalid_config(format!(
            "{name} must be > 0"
        )));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostModelError::invalid_config(format!(
            "{name} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}
