//! Optimization hints.
//!
//! Hints come from [`HINT_RULES`], a fixed ordered table of
//! `(condition, severity, template)` entries. Every rule is evaluated once per
//! analysis; the fired hints are then stable-sorted so the most severe come
//! first while rules of equal severity keep table order.
//!
//! Templates may contain these placeholders:
//!
//! - `{pct}`: the measured utilization as a whole percentage
//! - `{pct1}`: the measured utilization with one decimal
//! - `{label}`: the ledger sub-dimension label

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cost::{CpuCost, LedgerCost, LedgerDimension, MemoryCost};

/// Hint severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Tip,
    Moderate,
    Warning,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Tip => "tip",
            Severity::Moderate => "moderate",
            Severity::Warning => "warning",
            Severity::High => "high",
            Severity::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// What a hint is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    CriticalCpu,
    HighCpu,
    LedgerPressure,
    CriticalMemory,
    ModerateMemory,
    HighLedger,
    RedundantReads,
    Efficient,
}

/// Predicate of a hint rule over the three costs.
///
/// Ranges are open below and closed above: `CpuWithin { above: 0.6, up_to: 0.8 }`
/// matches `0.6 < u <= 0.8`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HintCondition {
    CpuAbove(f64),
    CpuWithin { above: f64, up_to: f64 },
    PressureAbove(f64),
    MemoryAbove(f64),
    MemoryWithin { above: f64, up_to: f64 },
    LedgerAbove(LedgerDimension, f64),
    CpuAndReadEntriesAbove { cpu: f64, read_entries: f64 },
    /// Fires only when no other rule did.
    NoOtherHint,
}

impl HintCondition {
    /// The utilization a message reports when the condition holds.
    fn evaluate(&self, cpu: &CpuCost, memory: &MemoryCost, ledger: &LedgerCost) -> Option<f64> {
        let within = |u: f64, above: f64, up_to: f64| u > above && u <= up_to;
        match *self {
            HintCondition::CpuAbove(limit) => (cpu.normalized > limit).then_some(cpu.normalized),
            HintCondition::CpuWithin { above, up_to } => {
                within(cpu.normalized, above, up_to).then_some(cpu.normalized)
            }
            HintCondition::PressureAbove(limit) => {
                (cpu.pressure > limit).then(|| cpu.ledger_utilization())
            }
            HintCondition::MemoryAbove(limit) => {
                (memory.normalized > limit).then_some(memory.normalized)
            }
            HintCondition::MemoryWithin { above, up_to } => {
                within(memory.normalized, above, up_to).then_some(memory.normalized)
            }
            HintCondition::LedgerAbove(dimension, limit) => {
                let u = ledger.breakdown.get(dimension);
                (u > limit).then_some(u)
            }
            HintCondition::CpuAndReadEntriesAbove { cpu: cpu_limit, read_entries } => {
                (cpu.normalized > cpu_limit && ledger.breakdown.read_entries > read_entries)
                    .then_some(cpu.normalized)
            }
            HintCondition::NoOtherHint => None,
        }
    }
}

/// One row of the hint table.
#[derive(Debug, Clone, Copy)]
pub struct HintRule {
    pub kind: HintKind,
    pub condition: HintCondition,
    pub severity: Severity,
    pub template: &'static str,
}

const fn ledger_rule(dimension: LedgerDimension) -> HintRule {
    HintRule {
        kind: HintKind::HighLedger,
        condition: HintCondition::LedgerAbove(dimension, 0.75),
        severity: Severity::High,
        template: "HIGH {label}. Consider batching or compression.",
    }
}

/// The hint table, in evaluation order.
pub static HINT_RULES: [HintRule; 12] = [
    HintRule {
        kind: HintKind::CriticalCpu,
        condition: HintCondition::CpuAbove(0.8),
        severity: Severity::Critical,
        template: "CRITICAL: CPU usage at {pct}. Reduce instruction count.",
    },
    HintRule {
        kind: HintKind::HighCpu,
        condition: HintCondition::CpuWithin {
            above: 0.6,
            up_to: 0.8,
        },
        severity: Severity::High,
        template: "HIGH CPU: Optimize hot loops and host function calls.",
    },
    HintRule {
        kind: HintKind::LedgerPressure,
        condition: HintCondition::PressureAbove(0.5),
        severity: Severity::Warning,
        template: "High ledger CPU pressure ({pct1}).",
    },
    HintRule {
        kind: HintKind::CriticalMemory,
        condition: HintCondition::MemoryAbove(0.7),
        severity: Severity::Critical,
        template: "CRITICAL: Memory usage at {pct}. Optimize allocations.",
    },
    HintRule {
        kind: HintKind::ModerateMemory,
        condition: HintCondition::MemoryWithin {
            above: 0.5,
            up_to: 0.7,
        },
        severity: Severity::Moderate,
        template: "MODERATE memory usage. Review data structure sizes.",
    },
    ledger_rule(LedgerDimension::ReadEntries),
    ledger_rule(LedgerDimension::ReadBytes),
    ledger_rule(LedgerDimension::WriteEntries),
    ledger_rule(LedgerDimension::WriteBytes),
    ledger_rule(LedgerDimension::Bandwidth),
    HintRule {
        kind: HintKind::RedundantReads,
        condition: HintCondition::CpuAndReadEntriesAbove {
            cpu: 0.7,
            read_entries: 0.5,
        },
        severity: Severity::Tip,
        template: "TIP: High CPU + reads. Check for redundant storage accesses.",
    },
    HintRule {
        kind: HintKind::Efficient,
        condition: HintCondition::NoOtherHint,
        severity: Severity::Info,
        template: "Excellent resource efficiency!",
    },
];

/// A fired hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub kind: HintKind,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn render(rule: &HintRule, utilization: f64) -> String {
    let mut message = rule.template.to_string();
    if message.contains("{pct}") {
        message = message.replace("{pct}", &format!("{:.0}%", utilization * 100.0));
    }
    if message.contains("{pct1}") {
        message = message.replace("{pct1}", &format!("{:.1}%", utilization * 100.0));
    }
    if let HintCondition::LedgerAbove(dimension, _) = rule.condition {
        message = message.replace("{label}", dimension.label());
    }
    message
}

/// Evaluate every rule and return the fired hints, most severe first.
///
/// Always returns at least one hint.
pub fn generate_hints(cpu: &CpuCost, memory: &MemoryCost, ledger: &LedgerCost) -> Vec<Hint> {
    let mut hints: Vec<Hint> = HINT_RULES
        .iter()
        .filter_map(|rule| {
            rule.condition
                .evaluate(cpu, memory, ledger)
                .map(|utilization| Hint {
                    kind: rule.kind,
                    severity: rule.severity,
                    message: render(rule, utilization),
                })
        })
        .collect();

    if hints.is_empty() {
        hints.extend(
            HINT_RULES
                .iter()
                .filter(|rule| matches!(rule.condition, HintCondition::NoOtherHint))
                .map(|rule| Hint {
                    kind: rule.kind,
                    severity: rule.severity,
                    message: render(rule, 0.0),
                }),
        );
    }

    // Vec::sort_by is stable, so equal severities keep table order.
    hints.sort_by(|a, b| b.severity.cmp(&a.severity));

    tracing::trace!(count = hints.len(), "hints: generated");
    hints
}
