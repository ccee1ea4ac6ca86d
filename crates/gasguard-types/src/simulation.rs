//! Simulation result types.
//!
//! Field names follow the camelCase JSON emitted by the simulation RPC, so a
//! payload can be deserialized directly:
//!
//! ```
//! use gasguard_types::SimulationResult;
//!
//! let json = r#"{
//!     "instructions": 1250000,
//!     "memoryBytes": 2097152,
//!     "resources": {
//!         "footprint": { "readOnly": ["balance_alice"], "readWrite": ["balance_bob"] },
//!         "instructions": 1250000,
//!         "readBytes": 512,
//!         "writeBytes": 256
//!     },
//!     "transactionSizeBytes": 4096
//! }"#;
//!
//! let sim: SimulationResult = serde_json::from_str(json).unwrap();
//! assert_eq!(sim.read_entry_count(), 1);
//! assert_eq!(sim.write_entry_count(), 1);
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ledger entries a transaction declares it will touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footprint {
    /// Entries only read.
    #[serde(default)]
    pub read_only: Vec<String>,
    /// Entries read and written.
    #[serde(default)]
    pub read_write: Vec<String>,
}

impl Footprint {
    pub fn new(read_only: Vec<String>, read_write: Vec<String>) -> Self {
        Self {
            read_only,
            read_write,
        }
    }

    /// Footprint with no ledger access.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the first malformed entry, if any.
    ///
    /// Runs in time linear in the number of keys.
    pub fn find_conflict(&self) -> Option<FootprintConflict<'_>> {
        let mut read_write = HashSet::with_capacity(self.read_write.len());
        for key in &self.read_write {
            if !read_write.insert(key.as_str()) {
                return Some(FootprintConflict::DuplicateReadWrite(key));
            }
        }

        let mut read_only = HashSet::with_capacity(self.read_only.len());
        for key in &self.read_only {
            if read_write.contains(key.as_str()) {
                return Some(FootprintConflict::Overlap(key));
            }
            if !read_only.insert(key.as_str()) {
                return Some(FootprintConflict::DuplicateReadOnly(key));
            }
        }
        None
    }
}

/// A footprint key that is declared inconsistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintConflict<'a> {
    /// Listed more than once as read-only.
    DuplicateReadOnly(&'a str),
    /// Listed more than once as read-write.
    DuplicateReadWrite(&'a str),
    /// Declared both read-only and read-write.
    Overlap(&'a str),
}

impl FootprintConflict<'_> {
    pub fn key(&self) -> &str {
        match self {
            Self::DuplicateReadOnly(key)
            | Self::DuplicateReadWrite(key)
            | Self::Overlap(key) => *key,
        }
    }
}

impl fmt::Display for FootprintConflict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateReadOnly(key) => {
                write!(f, "ledger key `{key}` is listed more than once as read-only")
            }
            Self::DuplicateReadWrite(key) => {
                write!(f, "ledger key `{key}` is listed more than once as read-write")
            }
            Self::Overlap(key) => {
                write!(f, "ledger key `{key}` is declared both read-only and read-write")
            }
        }
    }
}

/// Resources reported by the simulation for one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SorobanResources {
    pub footprint: Footprint,
    /// Instruction count as declared in the resource section.
    pub instructions: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
}

/// Result of one simulated contract execution.
///
/// Counts are unsigned; a payload carrying a negative quantity fails to
/// deserialize rather than producing a bogus value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// CPU instructions consumed.
    pub instructions: u64,
    /// Peak memory consumed, in bytes.
    pub memory_bytes: u64,
    pub resources: SorobanResources,
    /// Encoded transaction envelope size, in bytes.
    pub transaction_size_bytes: u64,
}

impl SimulationResult {
    /// A simulation that consumed nothing.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Number of read-only ledger entries in the footprint.
    pub fn read_entry_count(&self) -> u64 {
        self.resources.footprint.read_only.len() as u64
    }

    /// Number of read-write ledger entries in the footprint.
    pub fn write_entry_count(&self) -> u64 {
        self.resources.footprint.read_write.len() as u64
    }

    pub fn read_bytes(&self) -> u64 {
        self.resources.read_bytes
    }

    pub fn write_bytes(&self) -> u64 {
        self.resources.write_bytes
    }
}
