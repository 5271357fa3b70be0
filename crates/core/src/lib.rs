//! Wildfire Spread Core Library
//!
//! A deterministic, step-driven wildfire spread engine for tile-based games.
//! Fire moves across a procedurally generated terrain grid one ring of
//! neighbors per step, pushed along by a noise-driven weather field.
//!
//! ## Components
//!
//! - [`grid`]: tiles, terrain attributes and seeded terrain generation
//! - [`weather`]: coherent, slowly evolving temperature/humidity/wind field
//! - [`spread`]: the per-step spread engine
//! - [`simulation`]: a reference driver owning the clock and player interventions
//! - [`config`]: TOML-loadable scenario configuration
//!
//! ## Quick start
//!
//! ```
//! use wildfire_core::{generate, FireSpreadEngine, SpreadConfig, WeatherConfig, WeatherField};
//!
//! let mut grid = generate(32, 32, 7).unwrap();
//! let mut weather = WeatherField::new(32, 32, 7, WeatherConfig::default()).unwrap();
//! let engine = FireSpreadEngine::new(SpreadConfig::default()).unwrap();
//!
//! // Light the first flammable tile
//! let (x, y) = grid
//!     .iter()
//!     .find(|t| t.is_ignitable())
//!     .map(|t| t.position())
//!     .unwrap();
//! grid.get_mut(x, y).unwrap().ignite();
//!
//! for _ in 0..5 {
//!     weather.tick(20.0);
//!     engine.step(&mut grid, &weather);
//! }
//! ```

pub mod config;
pub mod core_types;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod spread;
pub mod weather;

pub use config::ScenarioConfig;
pub use error::{Result, SimError};
pub use grid::{generate, BurnStatus, Grid, Terrain, TerrainGenerator, TerrainTable, Tile};
pub use simulation::{Simulation, SimulationStats};
pub use spread::{FireSpreadEngine, SpreadConfig, StepReport};
pub use weather::{RiskLevel, WeatherConfig, WeatherField, WeatherSample, WindDirection};
