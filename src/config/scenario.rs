use crate::core::engine::VehicleEntry;
use crate::core::GroupId;
use crate::utils::error::{CarPoolError, Result};
use crate::utils::validation::{validate_non_empty_list, validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    /// Initial fleet, installed before the first step.
    #[serde(default)]
    pub vehicles: Vec<VehicleEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    InitializeFleet {
        #[serde(default)]
        vehicles: Vec<VehicleEntry>,
    },
    Journey {
        group: GroupId,
        people: i64,
    },
    DropOff {
        group: GroupId,
    },
    Locate {
        group: GroupId,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::InitializeFleet { vehicles } => {
                write!(f, "initialize fleet ({} vehicles)", vehicles.len())
            }
            Step::Journey { group, people } => write!(f, "journey {} ({} people)", group, people),
            Step::DropOff { group } => write!(f, "drop off {}", group),
            Step::Locate { group } => write!(f, "locate {}", group),
        }
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CarPoolError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CarPoolError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FLEET_VEHICLE_ID})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CarPoolError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Steps in execution order, the initial fleet first when one is given.
    pub fn plan(&self) -> Vec<Step> {
        let mut plan = Vec::with_capacity(self.steps.len() + 1);
        if !self.vehicles.is_empty() {
            plan.push(Step::InitializeFleet {
                vehicles: self.vehicles.clone(),
            });
        }
        plan.extend(self.steps.iter().cloned());
        plan
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;
        validate_non_empty_list("steps", &self.steps)?;
        Ok(())
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
