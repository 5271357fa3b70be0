//! Cellular fire spread engine
//!
//! Each step propagates fire exactly one ring of 4-connected neighbors out
//! from the tiles that were burning *before* the step:
//!
//! 1. Collect the pre-step burning set and its ignitable neighbors (reads only)
//! 2. Decide every candidate from pre-step state:
//!    `flammability * 100 + weather influence > ignition_threshold`
//! 3. Ignite the winners, then burn one unit of fuel on every pre-step
//!    burning tile, turning it `Burnt` once fuel reaches zero
//!
//! Tiles ignited during a step neither spread nor consume fuel until the
//! next step, so the result does not depend on scan order.

use crate::error::{Result, SimError};
use crate::grid::{Grid, Tile};
use crate::weather::WeatherField;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Flammability is expressed on a percent-like scale in the ignition score
const FLAMMABILITY_SCALE: f32 = 100.0;

/// Spread tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    /// Ignition score a neighbor must exceed to catch fire
    pub ignition_threshold: f32,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            ignition_threshold: 75.0,
        }
    }
}

impl SpreadConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ignition_threshold.is_finite() {
            Ok(())
        } else {
            Err(SimError::parameter(
                "ignition_threshold",
                format!("must be finite, got {}", self.ignition_threshold),
            ))
        }
    }
}

/// State changes produced by one step, for the visualization layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Tiles that started burning this step
    pub ignited: Vec<(usize, usize)>,
    /// Tiles that ran out of fuel this step
    pub burned_out: Vec<(usize, usize)>,
}

impl StepReport {
    /// Number of newly ignited tiles
    pub fn ignited_count(&self) -> usize {
        self.ignited.len()
    }
}

/// Advances burn state one discrete step at a time
#[derive(Debug, Clone, Default)]
pub struct FireSpreadEngine {
    config: SpreadConfig,
}

impl FireSpreadEngine {
    pub fn new(config: SpreadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SpreadConfig {
        &self.config
    }

    pub fn ignition_threshold(&self) -> f32 {
        self.config.ignition_threshold
    }

    /// Ignition score of a tile under the current weather
    pub fn ignition_chance(&self, tile: &Tile, weather: &WeatherField) -> f32 {
        let sample = weather.local_weather(tile.x() as f32, tile.y() as f32);
        tile.flammability() * FLAMMABILITY_SCALE + weather.weather_influence(&sample)
    }

    /// Advance one step; returns the number of newly ignited tiles
    pub fn step(&self, grid: &mut Grid, weather: &WeatherField) -> usize {
        self.step_report(grid, weather).ignited_count()
    }

    /// Advance one step and report every state change
    pub fn step_report(&self, grid: &mut Grid, weather: &WeatherField) -> StepReport {
        let burning = grid.burning_positions();
        if burning.is_empty() {
            return StepReport::default();
        }

        // Reads: every decision uses pre-step state only
        let mut seen = FxHashSet::default();
        let mut ignited = Vec::new();
        for &(x, y) in &burning {
            for (nx, ny) in grid.neighbors4(x, y) {
                let Some(neighbor) = grid.get(nx, ny) else {
                    continue;
                };
                if !neighbor.is_ignitable() || !seen.insert((nx, ny)) {
                    continue;
                }
                if self.ignition_chance(neighbor, weather) > self.config.ignition_threshold {
                    ignited.push((nx, ny));
                }
            }
        }

        // Writes
        for &(x, y) in &ignited {
            if let Some(tile) = grid.get_mut(x, y) {
                tile.ignite();
            }
        }

        let mut burned_out = Vec::new();
        for &(x, y) in &burning {
            if let Some(tile) = grid.get_mut(x, y) {
                if tile.consume_fuel() {
                    burned_out.push((x, y));
                }
            }
        }

        debug!(
            "Spread step: {} burning before, {} ignited, {} burned out",
            burning.len(),
            ignited.len(),
            burned_out.len()
        );

        StepReport {
            ignited,
            burned_out,
        }
    }
}
