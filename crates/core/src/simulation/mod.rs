//! Reference simulation driver
//!
//! `Simulation` owns one run: the grid, the weather field, the spread engine
//! and the intervention queue. It keeps the game clock, ticks weather every
//! `advance()` call and runs a spread step each time `step_interval`
//! simulated seconds have accumulated. Player interventions are queued and
//! only touch the grid between steps.
//!
//! # Example
//!
//! ```
//! use wildfire_core::config::ScenarioConfig;
//! use wildfire_core::simulation::Simulation;
//!
//! let config = ScenarioConfig {
//!     width: 16,
//!     height: 16,
//!     seed: 3,
//!     ..ScenarioConfig::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! sim.ignite(8, 8);
//! sim.advance(20.0); // one full step interval
//! assert_eq!(sim.stats().steps, 1);
//! ```

pub mod intervention;

pub use intervention::{Intervention, InterventionKind, InterventionQueue};

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::grid::{BurnCounts, Grid, TerrainGenerator};
use crate::spread::{FireSpreadEngine, StepReport};
use crate::weather::{RiskLevel, WeatherField};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Upper bound on spread steps run by a single `advance()` call
pub const MAX_STEPS_PER_ADVANCE: u32 = 10_000;

/// Snapshot of run progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    /// Spread steps executed
    pub steps: u64,
    /// Tiles ignited by spread since the run started
    pub total_ignited: u64,
    /// Accumulated simulated seconds
    pub simulated_time: f32,
    /// Tiles per burn state
    pub counts: BurnCounts,
}

/// One wildfire run
#[derive(Debug)]
pub struct Simulation {
    config: ScenarioConfig,
    grid: Grid,
    weather: WeatherField,
    engine: FireSpreadEngine,
    interventions: InterventionQueue,
    /// Simulated seconds since the last spread step
    accumulator: f32,
    steps: u64,
    total_ignited: u64,
    last_report: StepReport,
}

impl Simulation {
    /// Validate the scenario and build a fresh run
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        config.validate()?;
        let engine = FireSpreadEngine::new(config.spread.clone())?;
        let (grid, weather) = Self::build_world(&config, config.seed)?;

        info!(
            "Creating simulation: {}x{} grid, seed={}, step_interval={:.1}s, threshold={:.1}",
            config.width,
            config.height,
            config.seed,
            config.step_interval,
            engine.ignition_threshold()
        );

        Ok(Self {
            config,
            grid,
            weather,
            engine,
            interventions: InterventionQueue::default(),
            accumulator: 0.0,
            steps: 0,
            total_ignited: 0,
            last_report: StepReport::default(),
        })
    }

    fn build_world(config: &ScenarioConfig, seed: u64) -> Result<(Grid, WeatherField)> {
        let mut grid = TerrainGenerator::new(config.terrain.clone()).generate(
            config.width,
            config.height,
            seed,
        )?;
        let weather = WeatherField::new(config.width, config.height, seed, config.weather.clone())?;

        for &[x, y] in &config.ignition {
            let lit = grid.get_mut(x, y).is_some_and(|tile| tile.ignite());
            if !lit {
                warn!("Initial ignition at ({}, {}) skipped: tile cannot burn", x, y);
            }
        }
        Ok((grid, weather))
    }

    /// Discard the grid and weather and start over with a new seed
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        let (grid, weather) = Self::build_world(&self.config, seed)?;
        info!("Restarting simulation with seed={}", seed);
        self.config.seed = seed;
        self.grid = grid;
        self.weather = weather;
        self.interventions.clear();
        self.accumulator = 0.0;
        self.steps = 0;
        self.total_ignited = 0;
        self.last_report = StepReport::default();
        Ok(())
    }

    /// Queue an ignition for the next step
    pub fn ignite(&mut self, x: usize, y: usize) {
        let timestamp = self.weather.global_time();
        self.interventions.submit(Intervention::ignite(x, y, timestamp));
    }

    /// Queue an extinguish for the next step
    pub fn extinguish(&mut self, x: usize, y: usize) {
        let timestamp = self.weather.global_time();
        self.interventions
            .submit(Intervention::extinguish(x, y, timestamp));
    }

    /// Advance the clock by `dt` simulated seconds
    ///
    /// Runs as many spread steps as fit in the accumulated time, at most
    /// [`MAX_STEPS_PER_ADVANCE`], and returns the number of tiles they ignited.
    pub fn advance(&mut self, dt: f32) -> usize {
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring invalid advance dt={}", dt);
            return 0;
        }
        self.weather.tick(dt);
        self.accumulator += dt;

        let interval = self.config.step_interval;
        let due = (self.accumulator / interval).floor();
        let steps = if due > MAX_STEPS_PER_ADVANCE as f32 {
            warn!(
                "{} steps due in one advance, running {} and dropping the backlog",
                due, MAX_STEPS_PER_ADVANCE
            );
            self.accumulator = 0.0;
            MAX_STEPS_PER_ADVANCE
        } else {
            self.accumulator = (self.accumulator - due * interval).clamp(0.0, interval);
            due as u32
        };

        (0..steps).map(|_| self.step_now()).sum()
    }

    /// Apply queued interventions and run one spread step immediately
    pub fn step_now(&mut self) -> usize {
        self.apply_interventions();
        let report = self.engine.step_report(&mut self.grid, &self.weather);
        let ignited = report.ignited_count();

        self.steps += 1;
        self.total_ignited += ignited as u64;
        self.last_report = report;
        debug!(
            "Step {} at t={:.1}s: {} ignited",
            self.steps,
            self.weather.global_time(),
            ignited
        );
        ignited
    }

    fn apply_interventions(&mut self) {
        for intervention in self.interventions.take_pending() {
            let Intervention { kind, x, y, .. } = intervention;
            let Some(tile) = self.grid.get_mut(x, y) else {
                warn!("Intervention {:?} at ({}, {}) is out of bounds", kind, x, y);
                continue;
            };
            let applied = match kind {
                InterventionKind::Extinguish => tile.extinguish(),
                InterventionKind::Ignite => tile.ignite(),
            };
            if applied {
                self.interventions.mark_applied(intervention);
            } else {
                warn!(
                    "Intervention {:?} at ({}, {}) had no effect on a {:?} {} tile",
                    kind,
                    x,
                    y,
                    tile.burn_status(),
                    tile.terrain()
                );
            }
        }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn weather(&self) -> &WeatherField {
        &self.weather
    }

    pub fn engine(&self) -> &FireSpreadEngine {
        &self.engine
    }

    pub fn interventions(&self) -> &InterventionQueue {
        &self.interventions
    }

    /// State changes from the most recent step
    pub fn last_report(&self) -> &StepReport {
        &self.last_report
    }

    /// True while any tile burns or an intervention is pending
    pub fn is_active(&self) -> bool {
        !self.interventions.pending().is_empty() || self.grid.iter().any(|t| t.is_burning())
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            steps: self.steps,
            total_ignited: self.total_ignited,
            simulated_time: self.weather.global_time(),
            counts: self.grid.burn_counts(),
        }
    }

    /// Map-wide risk in [0, 1]
    pub fn global_risk(&self) -> f32 {
        self.weather.global_risk()
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_risk(self.global_risk())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BurnStatus, TerrainConfig, TerrainLayout, TerrainTable};
    use crate::spread::SpreadConfig;

    /// 10x10 map where every kind burns like grass and spread is guaranteed
    fn grass_config() -> ScenarioConfig {
        let grass = TerrainTable::default().grass;
        ScenarioConfig {
            width: 10,
            height: 10,
            seed: 11,
            terrain: TerrainConfig {
                layout: TerrainLayout::Uniform,
                table: TerrainTable {
                    grass,
                    shrub: grass,
                    tree: grass,
                    water: grass,
                },
                ..TerrainConfig::default()
            },
            spread: SpreadConfig {
                ignition_threshold: 0.0,
            },
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn test_steps_follow_interval() {
        let mut sim = Simulation::new(grass_config()).unwrap();
        sim.advance(5.0);
        assert_eq!(sim.stats().steps, 0);
        sim.advance(15.0);
        assert_eq!(sim.stats().steps, 1);
        sim.advance(45.0);
        assert_eq!(sim.stats().steps, 3);
        assert_eq!(sim.stats().simulated_time, 65.0);
    }

    #[test]
    fn test_large_dt_runs_every_due_step() {
        let mut sim = Simulation::new(grass_config()).unwrap();
        sim.advance(210.0);
        assert_eq!(sim.stats().steps, 10);
        // The 10 s remainder carries over
        sim.advance(10.0);
        assert_eq!(sim.stats().steps, 11);
    }

    #[test]
    fn test_tiny_step_interval_is_capped() {
        let config = ScenarioConfig {
            step_interval: 1e-9,
            ..grass_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.advance(1.0);
        assert_eq!(sim.stats().steps, u64::from(MAX_STEPS_PER_ADVANCE));
        // Backlog was dropped rather than replayed
        sim.advance(0.0);
        assert_eq!(sim.stats().steps, u64::from(MAX_STEPS_PER_ADVANCE));
    }

    #[test]
    fn test_interventions_apply_between_steps() {
        let mut sim = Simulation::new(grass_config()).unwrap();
        sim.ignite(5, 5);
        assert_eq!(sim.grid().get(5, 5).unwrap().burn_status(), BurnStatus::Unburned);

        assert_eq!(sim.step_now(), 4);
        // Grass fuel lasts a single step
        assert_eq!(sim.grid().get(5, 5).unwrap().burn_status(), BurnStatus::Burnt);

        sim.extinguish(5, 4);
        sim.step_now();
        assert_eq!(
            sim.grid().get(5, 4).unwrap().burn_status(),
            BurnStatus::Extinguished
        );
        assert_eq!(sim.interventions().history_len(), 2);
    }

    #[test]
    fn test_out_of_bounds_intervention_ignored() {
        let mut sim = Simulation::new(grass_config()).unwrap();
        sim.ignite(50, 50);
        sim.extinguish(0, 0);
        assert_eq!(sim.step_now(), 0);
        assert_eq!(sim.interventions().history_len(), 0);
        assert!(!sim.is_active());
    }

    #[test]
    fn test_initial_ignition_from_config() {
        let config = ScenarioConfig {
            ignition: vec![[2, 3]],
            ..grass_config()
        };
        let sim = Simulation::new(config).unwrap();
        assert!(sim.grid().get(2, 3).unwrap().is_burning());
        assert!(sim.is_active());
    }

    #[test]
    fn test_restart_replaces_world() {
        let config = ScenarioConfig {
            ignition: vec![[0, 0]],
            ..grass_config()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.advance(100.0);
        assert!(sim.stats().steps > 0);

        sim.restart(99).unwrap();
        let stats = sim.stats();
        assert_eq!(stats.steps, 0);
        assert_eq!(stats.total_ignited, 0);
        assert_eq!(stats.simulated_time, 0.0);
        assert_eq!(sim.config().seed, 99);
        assert!(sim.grid().get(0, 0).unwrap().is_burning());
        assert_eq!(stats.counts.burning, 1);
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let config = ScenarioConfig {
            height: 0,
            ..ScenarioConfig::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_risk_level_matches_global_risk() {
        let sim = Simulation::new(grass_config()).unwrap();
        assert_eq!(sim.risk_level(), RiskLevel::from_risk(sim.global_risk()));
    }
}
