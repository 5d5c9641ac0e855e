pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{MemoryGroupStore, MemoryVehicleStore};
pub use config::{ScenarioConfig, Step};
pub use core::engine::{CarPoolEngine, Location, VehicleEntry};
pub use core::scenario::{ScenarioReport, ScenarioRunner, StepOutcome};
pub use utils::error::{CarPoolError, Result};
