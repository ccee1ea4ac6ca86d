//! Config command - validate and print a configuration snapshot

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use super::output;

#[derive(Parser, Debug)]
#[command(about = "Validate and print a configuration snapshot")]
pub struct ConfigCmd {
    /// Configuration snapshot JSON (default: built-in mainnet snapshot)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConfigCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let snapshot = super::resolve_config(self.config.as_deref())?;

        if json_output {
            println!("{}", snapshot.to_json_pretty()?);
        } else {
            print!("{}", output::format_config(&snapshot));
        }
        Ok(())
    }
}
