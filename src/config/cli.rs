use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "car-sharing")]
#[command(about = "Allocate rider groups to a vehicle fleet, driven by a scenario file")]
pub struct CliConfig {
    /// Path to the TOML scenario file
    #[arg(short, long, default_value = "scenario.toml")]
    pub scenario: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print the scenario report as JSON
    #[arg(long)]
    pub json: bool,

    /// Validate and summarize the scenario without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Stop at the first failing step
    #[arg(long)]
    pub fail_fast: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("scenario", &self.scenario)
    }
}
