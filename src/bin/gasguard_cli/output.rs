//! Output formatting for the gasguard CLI
//!
//! Human-readable renderings; JSON output serializes the library types directly.

use gasguard::core::config::ScoringThresholds;
use gasguard::core::cost::LedgerDimension;
use gasguard::core::scoring::ScoreBand;
use gasguard::{Analysis, ConfigSnapshot, CostModelError};

fn score_color(score: u8) -> &'static str {
    match score {
        80..=100 => "\x1b[32m",
        50..=79 => "\x1b[33m",
        _ => "\x1b[31m",
    }
}

fn band_name(utilization: f64, thresholds: &ScoringThresholds) -> &'static str {
    match ScoreBand::for_utilization(utilization, thresholds) {
        ScoreBand::Excellent => "excellent",
        ScoreBand::Good => "good",
        ScoreBand::Poor => "poor",
    }
}

/// Format an analysis for display.
pub fn format_analysis(
    analysis: &Analysis,
    thresholds: &ScoringThresholds,
    verbose: bool,
) -> String {
    let mut out = String::new();
    let costs = &analysis.costs;
    let scores = &analysis.scores;

    if analysis.safety_violations.is_empty() {
        out.push_str("\x1b[32m✓ Within safety margin\x1b[0m\n\n");
    } else {
        out.push_str("\x1b[31m✗ Safety margin exceeded\x1b[0m\n");
        for violation in &analysis.safety_violations {
            out.push_str(&format!("  {violation}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{}Total score: {}\x1b[0m\n",
        score_color(scores.total),
        scores.total
    ));
    out.push_str(&format!("Estimated fee: {:.7}\n\n", analysis.total_fee()));

    out.push_str("\x1b[1mScores:\x1b[0m\n");
    for (name, score, utilization) in [
        ("cpu", scores.cpu, costs.cpu.normalized),
        ("memory", scores.memory, costs.memory.normalized),
        ("ledger", scores.ledger, costs.ledger.normalized),
    ] {
        out.push_str(&format!(
            "  {name:<8} {score:>3}  ({:.1}% used, {})\n",
            utilization * 100.0,
            band_name(utilization, thresholds)
        ));
    }
    out.push('\n');

    if verbose {
        out.push_str("\x1b[1mCPU:\x1b[0m\n");
        out.push_str(&format!("  fee          {:.7}\n", costs.cpu.fee));
        out.push_str(&format!("  total        {:.7}\n", costs.cpu.total));
        out.push_str(&format!(
            "  ledger share {:.2}%\n",
            costs.cpu.ledger_utilization() * 100.0
        ));
        out.push_str("\x1b[1mMemory:\x1b[0m\n");
        out.push_str(&format!("  bytes used   {}\n", costs.memory.bytes_used));
        out.push_str(&format!("  penalty      {:.2}\n", costs.memory.cost));
        out.push_str("\x1b[1mLedger:\x1b[0m\n");
        for dimension in LedgerDimension::ALL {
            out.push_str(&format!(
                "  {:<14} {:>6.1}%  fee {:.7}\n",
                dimension.key(),
                costs.ledger.breakdown.get(dimension) * 100.0,
                costs.ledger.fee_breakdown.get(dimension)
            ));
        }
        out.push('\n');
    }

    out.push_str("\x1b[1mHints:\x1b[0m\n");
    for hint in &analysis.hints {
        out.push_str(&format!("  - {hint}\n"));
    }

    if verbose {
        out.push_str(&format!(
            "\nConfig: {}  at {}\n",
            analysis.config_version,
            analysis.timestamp.to_rfc3339()
        ));
    }
    out
}

/// Format a per-simulation failure.
pub fn format_error(err: &CostModelError) -> String {
    format!("\x1b[31m✗ {err}\x1b[0m")
}

/// Format a configuration snapshot for display.
pub fn format_config(config: &ConfigSnapshot) -> String {
    let mut out = String::new();
    let limits = &config.limits;
    let fees = &config.fees;
    let tuning = &config.tuning;

    out.push_str(&format!("Config version: {}\n\n", config.version));

    out.push_str("\x1b[1mLimits (per transaction / per ledger):\x1b[0m\n");
    for (name, tx, ledger) in [
        ("instructions", limits.tx_max_instructions, limits.ledger_max_instructions),
        (
            "read entries",
            limits.tx_max_read_ledger_entries,
            limits.ledger_max_read_ledger_entries,
        ),
        ("read bytes", limits.tx_max_read_bytes, limits.ledger_max_read_bytes),
        (
            "write entries",
            limits.tx_max_write_ledger_entries,
            limits.ledger_max_write_ledger_entries,
        ),
        ("write bytes", limits.tx_max_write_bytes, limits.ledger_max_write_bytes),
        ("tx size", limits.tx_max_size_bytes, limits.ledger_max_txs_size_bytes),
    ] {
        out.push_str(&format!("  {name:<14} {tx:>12} / {ledger}\n"));
    }
    out.push_str(&format!("  {:<14} {:>12}\n\n", "memory", limits.tx_memory_limit));

    out.push_str("\x1b[1mFees:\x1b[0m\n");
    out.push_str(&format!(
        "  {} per {} instructions\n",
        fees.fee_per_instruction_increment, fees.instructions_per_fee_increment
    ));
    out.push_str(&format!(
        "  {} per read entry, {} per write entry\n",
        fees.fee_read_ledger_entry, fees.fee_write_ledger_entry
    ));
    out.push_str(&format!(
        "  {} per KiB read, {} per KiB written, {} per KiB of transaction\n\n",
        fees.fee_read_1kb, fees.fee_write_1kb, fees.fee_tx_size_1kb
    ));

    out.push_str("\x1b[1mTuning:\x1b[0m\n");
    out.push_str(&format!(
        "  score weights  cpu {} / memory {} / ledger {}\n",
        tuning.score_weights.cpu(),
        tuning.score_weights.memory(),
        tuning.score_weights.ledger()
    ));
    out.push_str(&format!(
        "  thresholds     low {} / high {}\n",
        tuning.thresholds.low(),
        tuning.thresholds.high()
    ));
    out.push_str(&format!(
        "  ledger weights {:?}\n",
        tuning.ledger_weights.as_array()
    ));
    out.push_str(&format!(
        "  pressure weight {}, memory scale {}, safety margin {}\n",
        tuning.ledger_pressure_weight, tuning.memory_scaling_factor, tuning.safety_margin
    ));
    out
}
