//! Variable ranges
//!
//! This module provides the range that decoded discrete variables are scaled into.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Closed range `[min, max]` shared by every decoded discrete variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarRange {
    /// Value decoded from an all-zero bit group
    pub min: f64,
    /// Value decoded from an all-one bit group
    pub max: f64,
}

impl VarRange {
    /// Create a new range
    ///
    /// Fails unless both ends are finite and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Unit range `[0, 1]`
    pub fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    /// Check the ordering invariant
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Width of the range (max - min)
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value lies within the range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check if this is exactly `[0, 1]`
    pub fn is_unit(&self) -> bool {
        self.min == 0.0 && self.max == 1.0
    }

    /// Map a fraction in `[0, 1]` onto the range
    pub fn denormalize(&self, fraction: f64) -> f64 {
        self.min + fraction * self.width()
    }
}

impl Default for VarRange {
    fn default() -> Self {
        Self::unit()
    }
}

impl TryFrom<(f64, f64)> for VarRange {
    type Error = ConfigError;

    fn try_from((min, max): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}
