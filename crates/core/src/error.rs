//! Error types for scenario construction and configuration
//!
//! Only construction-time operations are fallible. Stepping the engine,
//! ticking weather and neighbor lookups never return errors: out-of-bounds
//! coordinates are filtered and reported as `None`.

use thiserror::Error;

/// Errors raised while building or configuring a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// Grid dimensions must both be non-zero
    #[error("invalid grid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions {
        /// Requested width in tiles
        width: usize,
        /// Requested height in tiles
        height: usize,
    },

    /// A terrain table entry is malformed
    #[error("invalid terrain table entry for {terrain}: {reason}")]
    InvalidTerrainTable {
        /// Terrain kind whose attributes are invalid
        terrain: String,
        /// What is wrong with the entry
        reason: String,
    },

    /// Any other scenario parameter out of range
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in scenario files
        name: &'static str,
        /// What is wrong with the value
        reason: String,
    },

    /// Scenario file could not be parsed
    #[error("failed to parse scenario: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Scenario file could not be read
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Shorthand for [`SimError::InvalidParameter`]
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SimError>;

/// Check that a value is finite and strictly positive
pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::parameter(
            name,
            format!("must be finite and > 0, got {value}"),
        ))
    }
}

/// Check that a value is finite and non-negative
pub(crate) fn require_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::parameter(
            name,
            format!("must be finite and >= 0, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_error_message() {
        let err = SimError::InvalidDimensions {
            width: 0,
            height: 4,
        };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 0x4: width and height must be non-zero"
        );
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("scale", 1.0).is_ok());
        assert!(require_positive("scale", 0.0).is_err());
        assert!(require_positive("scale", f32::NAN).is_err());
        assert!(require_non_negative("rate", 0.0).is_ok());
        assert!(require_non_negative("rate", -0.1).is_err());
    }
}
