use crate::utils::error::{CarPoolError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CarPoolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CarPoolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CarPoolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(CarPoolError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one entry is required".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("scenario", "scenarios/acceptance.toml").is_ok());
        assert!(validate_path("scenario", "").is_err());
        assert!(validate_path("scenario", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("scenario.name", "rush hour").is_ok());
        assert!(matches!(
            validate_non_empty_string("scenario.name", "   "),
            Err(CarPoolError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_list() {
        assert!(validate_non_empty_list("steps", &[1]).is_ok());
        assert!(matches!(
            validate_non_empty_list::<u8>("steps", &[]),
            Err(CarPoolError::ConfigValidationError { .. })
        ));
    }
}
