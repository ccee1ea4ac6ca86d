//! Simulation fixtures for tests.
//!
//! The two named scenarios mirror typical contract calls on mainnet limits:
//! a token transfer that barely touches any budget, and a multi-hop DeFi call
//! that uses three quarters of the instruction budget.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use gasguard::types::{Footprint, SorobanResources};
use gasguard::SimulationResult;
use serde::Serialize;

/// `n` distinct ledger keys with the given prefix.
pub fn keys(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{prefix}_{i}")).collect()
}

/// Simple transfer: 1.25% CPU, 5% memory, small footprint.
pub fn simple_transfer() -> SimulationResult {
    SimulationResult {
        instructions: 1_250_000,
        memory_bytes: 2_097_152,
        resources: SorobanResources {
            footprint: Footprint::new(keys("balance", 2), keys("account", 1)),
            instructions: 1_250_000,
            read_bytes: 1_000,
            write_bytes: 500,
        },
        transaction_size_bytes: 300,
    }
}

/// Complex call: 75% CPU, ~76.3% memory, ~16.7% weighted ledger.
pub fn complex_call() -> SimulationResult {
    SimulationResult {
        instructions: 75_000_000,
        memory_bytes: 32_000_000,
        resources: SorobanResources {
            footprint: Footprint::new(keys("pool", 10), keys("position", 5)),
            instructions: 75_000_000,
            read_bytes: 40_000,
            write_bytes: 10_000,
        },
        transaction_size_bytes: 8_500,
    }
}

#[allow(dead_code)]
pub fn sim_with_instructions(instructions: u64) -> SimulationResult {
    SimulationResult {
        instructions,
        ..SimulationResult::zero()
    }
}

#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Serialize `value` as pretty JSON into `dir/name`.
#[allow(dead_code)]
pub fn write_json<T: Serialize>(dir: &Path, name: &str, value: &T) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("write fixture");
    path
}
