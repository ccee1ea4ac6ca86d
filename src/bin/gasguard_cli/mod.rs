//! CLI subcommand implementations for gasguard

pub mod analyze;
pub mod config;
pub mod output;

use std::path::Path;

use anyhow::Result;
use gasguard::ConfigSnapshot;

/// Load the snapshot at `path`, or the mainnet preset when none is given.
pub fn resolve_config(path: Option<&Path>) -> Result<ConfigSnapshot> {
    match path {
        Some(path) => {
            let snapshot = gasguard::load_config_snapshot(path)?;
            tracing::info!(
                path = %path.display(),
                version = %snapshot.version,
                "loaded config snapshot"
            );
            Ok(snapshot)
        }
        None => Ok(ConfigSnapshot::mainnet()),
    }
}
