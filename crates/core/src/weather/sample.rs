//! Point weather samples and quantized wind direction

use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use std::fmt;

/// Compass direction the wind blows toward, quantized to 90° sectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    North,
    East,
    South,
    West,
}

impl WindDirection {
    /// Sector order, clockwise from north
    pub const ALL: [WindDirection; 4] = [
        WindDirection::North,
        WindDirection::East,
        WindDirection::South,
        WindDirection::West,
    ];

    /// Quantize a compass bearing (radians, clockwise from north)
    ///
    /// Each direction owns the 90° sector centred on it, so north covers
    /// `[-45°, 45°)`.
    pub fn from_bearing(bearing: f32) -> Self {
        let wrapped = (bearing + FRAC_PI_4).rem_euclid(TAU);
        let sector = (wrapped / FRAC_PI_2).floor() as usize % 4;
        Self::ALL[sector]
    }

    /// Bearing of the sector centre (radians, clockwise from north)
    pub fn bearing(&self) -> f32 {
        match self {
            WindDirection::North => 0.0,
            WindDirection::East => FRAC_PI_2,
            WindDirection::South => 2.0 * FRAC_PI_2,
            WindDirection::West => 3.0 * FRAC_PI_2,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            WindDirection::North => "N",
            WindDirection::East => "E",
            WindDirection::South => "S",
            WindDirection::West => "W",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Unit vector for a compass bearing (x east, y north)
#[inline]
pub(crate) fn bearing_vector(bearing: f32) -> Vector2<f32> {
    Vector2::new(bearing.sin(), bearing.cos())
}

/// Compass bearing of a map-space vector, in `[0, 2π)`
#[inline]
pub(crate) fn vector_bearing(v: &Vector2<f32>) -> f32 {
    v.x.atan2(v.y).rem_euclid(TAU)
}

/// Weather at one place and time
///
/// Recomputed on demand from the weather field; never stored on tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temperature: Fahrenheit,
    pub humidity: Percent,
    pub wind_speed: MilesPerHour,
    pub wind_direction: WindDirection,
}

impl fmt::Display for WeatherSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} ({:.1}), RH {:.0}, wind {:.1} {}",
            self.temperature,
            self.temperature.to_celsius(),
            self.humidity,
            self.wind_speed,
            self.wind_direction
        )
    }
}
