//! Analyze command - cost, score and safety report for simulation results

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};

use gasguard::core::config::ScoringThresholds;
use gasguard::{parse_simulation_result, Analysis, Analyzer, ConfigHandle, SimulationResult};

use super::output;

#[derive(Parser, Debug)]
#[command(about = "Analyze simulation results")]
pub struct AnalyzeCmd {
    /// Simulation result JSON file (repeat to analyze several in parallel)
    #[arg(long = "sim", value_name = "FILE", required = true)]
    pub sims: Vec<PathBuf>,

    /// Configuration snapshot JSON (default: built-in mainnet snapshot)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with an error when any safety-margin violation is found
    #[arg(long)]
    pub fail_on_violation: bool,
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    sim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a Analysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn read_simulation(path: &Path) -> Result<SimulationResult> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read simulation file: {}", path.display()))?;
    let sim = parse_simulation_result(&json)
        .with_context(|| format!("Invalid simulation file: {}", path.display()))?;
    Ok(sim)
}

impl AnalyzeCmd {
    pub fn execute(&self, json_output: bool, verbose: bool) -> Result<()> {
        let snapshot = super::resolve_config(self.config.as_deref())?;
        let thresholds = snapshot.tuning.thresholds;
        let analyzer = Analyzer::new(ConfigHandle::new(snapshot)?);

        let sims = self
            .sims
            .iter()
            .map(|path| read_simulation(path))
            .collect::<Result<Vec<_>>>()?;

        let (violations, failures) = if let [sim] = sims.as_slice() {
            let analysis = analyzer
                .analyze(sim)
                .with_context(|| format!("Failed to analyze {}", self.sims[0].display()))?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", output::format_analysis(&analysis, &thresholds, verbose));
            }
            (analysis.safety_violations.len(), 0)
        } else {
            let results = analyzer.analyze_batch(&sims);
            self.report_batch(&results, &thresholds, json_output, verbose)?
        };

        if failures > 0 {
            bail!("{failures} of {} simulation(s) could not be analyzed", sims.len());
        }
        if self.fail_on_violation && violations > 0 {
            bail!("{violations} safety-margin violation(s) found");
        }
        Ok(())
    }

    /// Print batch results and return `(violations, failures)`.
    fn report_batch(
        &self,
        results: &[gasguard::core::Result<Analysis>],
        thresholds: &ScoringThresholds,
        json_output: bool,
        verbose: bool,
    ) -> Result<(usize, usize)> {
        let mut violations = 0;
        let mut failures = 0;
        let mut entries = Vec::with_capacity(results.len());

        for (path, result) in self.sims.iter().zip(results) {
            let sim = path.display().to_string();
            match result {
                Ok(analysis) => {
                    violations += analysis.safety_violations.len();
                    if !json_output {
                        println!("== {sim}");
                        print!("{}", output::format_analysis(analysis, thresholds, verbose));
                        println!();
                    }
                    entries.push(BatchEntry {
                        sim,
                        analysis: Some(analysis),
                        error: None,
                    });
                }
                Err(err) => {
                    failures += 1;
                    if !json_output {
                        println!("== {sim}");
                        println!("{}", output::format_error(err));
                        println!();
                    }
                    entries.push(BatchEntry {
                        sim,
                        analysis: None,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        if json_output {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Ok((violations, failures))
    }
}
