//! Configuration validation.

use crate::{ConfigError, Result};
use std::fmt::Display;

/// Implemented by settings types that can check themselves after loading.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Common validation rules.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    pub fn in_range<T: PartialOrd + Display>(value: T, min: T, max: T, field: &str) -> Result<()> {
        if value < min || value > max {
            return Err(ConfigError::ValidationError(format!(
                "{} must be between {} and {} (got {})",
                field, min, max, value
            )));
        }
        Ok(())
    }

    pub fn one_of<T: PartialEq + Display>(value: &T, allowed: &[T], field: &str) -> Result<()> {
        if !allowed.contains(value) {
            let allowed: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            return Err(ConfigError::ValidationError(format!(
                "{} must be one of: {} (got {})",
                field,
                allowed.join(", "),
                value
            )));
        }
        Ok(())
    }
}
