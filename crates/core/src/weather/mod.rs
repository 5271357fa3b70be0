//! Procedural weather: noise-driven field, point samples and risk labels

pub mod field;
pub mod risk;
pub mod sample;

pub use field::{HumidityMode, NoiseScale, WeatherConfig, WeatherField};
pub use risk::RiskLevel;
pub use sample::{WeatherSample, WindDirection};
