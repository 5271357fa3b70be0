//! Discrete fire spread over the terrain grid

pub mod engine;

pub use engine::{FireSpreadEngine, SpreadConfig, StepReport};
