//! Scenario configuration
//!
//! Every parameter of a run lives in one [`ScenarioConfig`], loadable from
//! TOML. All fields have defaults, so a scenario file only lists overrides:
//!
//! ```
//! use wildfire_core::config::ScenarioConfig;
//! use wildfire_core::grid::TerrainLayout;
//!
//! let config = ScenarioConfig::from_toml_str(r#"
//!     width = 32
//!     height = 24
//!     seed = 7
//!     ignition = [[16, 12]]
//!
//!     [terrain]
//!     layout = "partitioned"
//!     min_partition = 3
//!
//!     [spread]
//!     ignition_threshold = 70.0
//! "#).unwrap();
//!
//! assert_eq!(config.terrain.layout, TerrainLayout::Partitioned);
//! assert_eq!(config.step_interval, 20.0);
//! ```

use crate::error::{require_positive, Result, SimError};
use crate::grid::TerrainConfig;
use crate::spread::SpreadConfig;
use crate::weather::WeatherConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Complete description of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Grid width in tiles
    pub width: usize,
    /// Grid height in tiles
    pub height: usize,
    /// Seed for terrain and weather
    pub seed: u64,
    /// Simulated seconds between spread steps
    pub step_interval: f32,
    /// Tiles set burning when the run starts, as `[x, y]`
    pub ignition: Vec<[usize; 2]>,
    pub terrain: TerrainConfig,
    pub spread: SpreadConfig,
    pub weather: WeatherConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            seed: 0,
            step_interval: 20.0,
            ignition: Vec::new(),
            terrain: TerrainConfig::default(),
            spread: SpreadConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parse and validate a TOML scenario
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!(
            "Loaded scenario {}: {}x{}, seed={}",
            path.display(),
            config.width,
            config.height,
            config.seed
        );
        Ok(config)
    }

    /// Check every parameter; nothing should be built from an invalid scenario
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        require_positive("step_interval", self.step_interval)?;
        if let Some([x, y]) = self
            .ignition
            .iter()
            .find(|[x, y]| *x >= self.width || *y >= self.height)
        {
            return Err(SimError::parameter(
                "ignition",
                format!("[{x}, {y}] lies outside the {}x{} grid", self.width, self.height),
            ));
        }
        self.terrain.validate()?;
        self.spread.validate()?;
        self.weather.validate()
    }
}
