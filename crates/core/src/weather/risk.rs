//! Display labels for map-wide fire risk
//!
//! Bands use an inclusive lower bound and exclusive upper bound `[a, b)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bounds of the Low, Moderate and High bands
const LOW_MAX: f32 = 0.25;
const MODERATE_MAX: f32 = 0.5;
const HIGH_MAX: f32 = 0.75;

/// Fire risk category for scenario labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// `[0.0, 0.25)`
    Low,
    /// `[0.25, 0.5)`
    Moderate,
    /// `[0.5, 0.75)`
    High,
    /// `[0.75, 1.0]`
    Extreme,
}

impl RiskLevel {
    /// Classify a global risk value in [0, 1]
    pub fn from_risk(risk: f32) -> Self {
        if risk < LOW_MAX {
            RiskLevel::Low
        } else if risk < MODERATE_MAX {
            RiskLevel::Moderate
        } else if risk < HIGH_MAX {
            RiskLevel::High
        } else {
            RiskLevel::Extreme
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        };
        f.write_str(label)
    }
}
