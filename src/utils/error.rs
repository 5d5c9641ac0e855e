use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarPoolError {
    #[error("capacity not supported: {seats} seats")]
    CapacityNotSupported { seats: i64 },

    #[error("wrong group size {people}, it has to be from 1 to 6")]
    InvalidGroupSize { people: i64 },

    #[error("not fit")]
    NotFit,

    #[error("not found")]
    NotFound,

    #[error("pk conflict")]
    PkConflict,

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Allocation,
    Lookup,
    Conflict,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CarPoolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CarPoolError::CapacityNotSupported { .. } | CarPoolError::InvalidGroupSize { .. } => {
                ErrorCategory::Validation
            }
            CarPoolError::NotFit => ErrorCategory::Allocation,
            CarPoolError::NotFound => ErrorCategory::Lookup,
            CarPoolError::PkConflict => ErrorCategory::Conflict,
            CarPoolError::StorageError { .. } => ErrorCategory::Storage,
            CarPoolError::ConfigValidationError { .. }
            | CarPoolError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CarPoolError::IoError(_) | CarPoolError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Rejected requests are `Low`: the system is healthy, the caller asked
    /// for something it cannot have.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation
            | ErrorCategory::Allocation
            | ErrorCategory::Lookup
            | ErrorCategory::Conflict => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CarPoolError::CapacityNotSupported { .. } => "Use vehicles with 4, 5 or 6 seats",
            CarPoolError::InvalidGroupSize { .. } => "Request journeys for 1 to 6 people",
            CarPoolError::NotFit => "Wait for a vehicle with enough free seats",
            CarPoolError::NotFound => "Check the group or vehicle id, it may already be dropped off",
            CarPoolError::PkConflict => "Use a fresh id, this one is already registered",
            CarPoolError::StorageError { .. } => "Retry the command once the store is available",
            CarPoolError::IoError(_) => "Check that the file exists and is readable",
            CarPoolError::SerializationError(_) => "Check the output can be encoded as JSON",
            CarPoolError::ConfigValidationError { .. }
            | CarPoolError::InvalidConfigValueError { .. } => {
                "Fix the scenario file and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CarPoolError::CapacityNotSupported { seats } => {
                format!("A vehicle with {} seats is not supported", seats)
            }
            CarPoolError::InvalidGroupSize { people } => {
                format!("A group of {} people cannot request a journey", people)
            }
            CarPoolError::NotFit => "The group does not fit in the vehicle".to_string(),
            CarPoolError::NotFound => "The requested group or vehicle does not exist".to_string(),
            CarPoolError::PkConflict => "That id is already in use".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CarPoolError>;
