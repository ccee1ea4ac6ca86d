//! The analysis pipeline.
//!
//! [`analyze`] runs the three cost calculators, then scoring, hint generation
//! and the safety check, and stamps the result with the time and the
//! configuration version. It is all-or-nothing: the first error is returned
//! and no partial [`Analysis`] is produced.
//!
//! # Example
//!
//! ```
//! use gasguard_core::analysis::analyze;
//! use gasguard_core::config::ConfigSnapshot;
//! use gasguard_types::SimulationResult;
//!
//! let analysis = analyze(&SimulationResult::zero(), &ConfigSnapshot::mainnet()).unwrap();
//! assert_eq!(analysis.scores.total, 100);
//! assert_eq!(analysis.hints, ["Excellent resource efficiency!"]);
//! assert!(analysis.safety_violations.is_empty());
//! ```

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use gasguard_types::SimulationResult;

use crate::config::{ConfigHandle, ConfigSnapshot};
use crate::cost::{compute_cpu_cost, compute_ledger_cost, compute_memory_cost, ResourceCosts};
use crate::errors::{CostModelError, Result};
use crate::hints::generate_hints;
use crate::safety::check_safety;
use crate::scoring::{compute_scores, RawScores, Scores};

/// Result of analyzing one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub costs: ResourceCosts,
    pub scores: Scores,
    pub raw_scores: RawScores,
    /// Hint messages, most severe first; never empty
    pub hints: Vec<String>,
    /// Violation messages; deployment should be blocked when non-empty
    pub safety_violations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    /// Version tag of the snapshot the analysis was computed against
    pub config_version: String,
}

impl Analysis {
    /// CPU fee plus ledger fee; memory carries no fee.
    pub fn total_fee(&self) -> f64 {
        self.costs.cpu.fee + self.costs.ledger.fee
    }

    pub fn is_safe(&self) -> bool {
        self.safety_violations.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Analyze a simulation against a configuration snapshot.
pub fn analyze(sim: &SimulationResult, config: &ConfigSnapshot) -> Result<Analysis> {
    analyze_at(sim, config, Utc::now())
}

/// Analyze with an explicit timestamp.
///
/// Two calls with the same arguments produce identical results.
pub fn analyze_at(
    sim: &SimulationResult,
    config: &ConfigSnapshot,
    timestamp: DateTime<Utc>,
) -> Result<Analysis> {
    tracing::debug!(
        config_version = %config.version,
        instructions = sim.instructions,
        memory_bytes = sim.memory_bytes,
        read_entries = sim.read_entry_count(),
        write_entries = sim.write_entry_count(),
        tx_size = sim.transaction_size_bytes,
        "analysis: starting"
    );

    let costs = ResourceCosts {
        cpu: compute_cpu_cost(sim, config)?,
        memory: compute_memory_cost(sim, config)?,
        ledger: compute_ledger_cost(sim, config)?,
    };

    let (scores, raw_scores) = compute_scores(&costs.cpu, &costs.memory, &costs.ledger, config);
    let hints = generate_hints(&costs.cpu, &costs.memory, &costs.ledger);
    let violations = check_safety(
        &costs.cpu,
        &costs.memory,
        &costs.ledger,
        config.tuning.safety_margin,
    );

    for hint in &hints {
        tracing::debug!(
            severity = %hint.severity,
            kind = ?hint.kind,
            message = %hint,
            "analysis: hint"
        );
    }

    for violation in &violations {
        tracing::warn!(
            dimension = %violation.dimension,
            utilization = violation.utilization,
            margin = violation.margin,
            "analysis: safety margin exceeded"
        );
    }

    tracing::debug!(
        total_score = scores.total,
        hints = hints.len(),
        violations = violations.len(),
        "analysis: complete"
    );

    Ok(Analysis {
        costs,
        scores,
        raw_scores,
        hints: hints.into_iter().map(|hint| hint.message).collect(),
        safety_violations: violations.iter().map(ToString::to_string).collect(),
        timestamp,
        config_version: config.version.clone(),
    })
}

/// Parse a simulation payload, rejecting malformed JSON as invalid input.
pub fn parse_simulation_result(json: &str) -> Result<SimulationResult> {
    serde_json::from_str(json).map_err(|e| {
        CostModelError::invalid_input(format!("failed to parse simulation result: {e}"))
    })
}

/// Analyzes simulations against the current snapshot of a [`ConfigHandle`].
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: ConfigHandle,
}

impl Analyzer {
    pub fn new(config: ConfigHandle) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn analyze(&self, sim: &SimulationResult) -> Result<Analysis> {
        let snapshot = self.config.current();
        analyze(sim, &snapshot)
    }

    /// Analyze many simulations in parallel against one snapshot.
    ///
    /// A snapshot replaced mid-batch does not affect the batch. Results are in
    /// input order and one failure does not affect the others.
    pub fn analyze_batch(&self, sims: &[SimulationResult]) -> Vec<Result<Analysis>> {
        let snapshot = self.config.current();
        let timestamp = Utc::now();

        tracing::info!(
            count = sims.len(),
            config_version = %snapshot.version,
            "analysis: starting batch"
        );

        let results: Vec<Result<Analysis>> = sims
            .par_iter()
            .map(|sim| analyze_at(sim, &snapshot, timestamp))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(
                failed = failed,
                total = sims.len(),
                "analysis: batch had failures"
            );
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sim_with(instructions: u64, memory_bytes: u64) -> SimulationResult {
        SimulationResult {
            instructions,
            memory_bytes,
            ..SimulationResult::zero()
        }
    }

    #[test]
    fn test_zero_simulation() {
        let config = ConfigSnapshot::mainnet();
        let analysis = analyze_at(&SimulationResult::zero(), &config, fixed_time()).unwrap();

        assert_eq!(analysis.scores.total, 100);
        assert_eq!(analysis.hints, ["Excellent resource efficiency!"]);
        assert!(analysis.is_safe());
        assert_eq!(analysis.total_fee(), 0.0);
        assert_eq!(analysis.config_version, "mainnet-v20");
        assert_eq!(analysis.timestamp, fixed_time());
    }

    #[test]
    fn test_to_json_pretty_roundtrip() {
        let config = ConfigSnapshot::mainnet();
        let analysis = analyze_at(&sim_with(1_000_000, 0), &config, fixed_time()).unwrap();
        let json: serde_json::Result<String> = analysis.to_json_pretty();
        let parsed: Analysis = serde_json::from_str(&json.unwrap()).unwrap();
        assert_eq!(parsed.scores, analysis.scores);
        assert_eq!(parsed.timestamp, fixed_time());
    }

    #[test]
    fn test_total_fee_excludes_memory() {
        let config = ConfigSnapshot::mainnet();
        let analysis = analyze(&sim_with(1_000_000, 10_000_000), &config).unwrap();
        assert!((analysis.total_fee() - analysis.costs.cpu.fee).abs() < 1e-15);
    }

    #[test]
    fn test_violation_reported() {
        let config = ConfigSnapshot::mainnet();
        let analysis = analyze(&sim_with(99_000_000, 0), &config).unwrap();
        assert_eq!(
            analysis.safety_violations,
            ["CPU at 99.0% exceeds 95% safety margin"]
        );
        assert!(!analysis.is_safe());
    }

    #[test]
    fn test_error_short_circuits() {
        let mut config = ConfigSnapshot::mainnet();
        config.limits.tx_memory_limit = 0;
        let err = analyze(&SimulationResult::zero(), &config).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_parse_simulation_result() {
        let sim = parse_simulation_result(
            r#"{"instructions": 5, "memoryBytes": 6,
                "resources": {"footprint": {}, "instructions": 5, "readBytes": 0, "writeBytes": 0},
                "transactionSizeBytes": 7}"#,
        )
        .unwrap();
        assert_eq!(sim.transaction_size_bytes, 7);

        let err = parse_simulation_result(r#"{"instructions": -1}"#).unwrap_err();
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_analyzer_uses_current_snapshot() {
        let handle = ConfigHandle::default();
        let analyzer = Analyzer::new(handle.clone());

        let before = analyzer.analyze(&SimulationResult::zero()).unwrap();
        handle
            .replace(ConfigSnapshot::mainnet().with_version("mainnet-v21"))
            .unwrap();
        let after = analyzer.analyze(&SimulationResult::zero()).unwrap();

        assert_eq!(before.config_version, "mainnet-v20");
        assert_eq!(after.config_version, "mainnet-v21");
    }

    #[test]
    fn test_batch_isolates_failures() {
        let analyzer = Analyzer::default();
        let mut bad = SimulationResult::zero();
        bad.resources.footprint.read_only = vec!["k".to_string()];
        bad.resources.footprint.read_write = vec!["k".to_string()];

        let sims = vec![sim_with(1_000_000, 0), bad, sim_with(50_000_000, 0)];
        let results = analyzer.analyze_batch(&sims);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());

        let first = results[0].as_ref().unwrap();
        let last = results[2].as_ref().unwrap();
        assert!(first.scores.cpu > last.scores.cpu);
        assert_eq!(first.timestamp, last.timestamp);
    }
}
