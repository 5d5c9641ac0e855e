#[cfg(feature = "cli")]
pub mod cli;
pub mod scenario;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use scenario::{ScenarioConfig, ScenarioInfo, Step};
