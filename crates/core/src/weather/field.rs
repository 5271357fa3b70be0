//! Procedural, time-evolving weather field
//!
//! Weather is not simulated physically. Each channel (temperature, wind
//! speed, wind direction and optionally humidity) is an independent layer of
//! seeded 3D value noise over `(x, y, time)`, which gives spatially and
//! temporally coherent variation. A slowly rotating global "front angle" is
//! blended into the local wind direction so the whole map drifts together,
//! like a large weather system passing over.
//!
//! Power-law transforms in [`WeatherField::weather_influence`] and
//! [`WeatherField::global_risk`] exaggerate the extremes so very dry, very
//! windy conditions stand out as clear high-risk regimes.

use crate::core_types::noise::ValueNoise;
use crate::core_types::units::{Fahrenheit, MilesPerHour, Percent};
use crate::error::{require_non_negative, require_positive, Result, SimError};
use crate::weather::sample::{bearing_vector, vector_bearing, WeatherSample, WindDirection};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::f32::consts::TAU;
use tracing::{debug, warn};

/// Noise layer per weather channel
const LAYER_BASE: u32 = 0;
const LAYER_TEMPERATURE: u32 = 1;
const LAYER_WIND_SPEED: u32 = 2;
const LAYER_WIND_DIRECTION: u32 = 3;
const LAYER_HUMIDITY: u32 = 4;

/// Memo is dropped wholesale once it grows past this many entries
const MAX_CACHE_ENTRIES: usize = 1 << 16;

/// Blended wind vectors shorter than this fall back to the front angle
const MIN_BLEND_LENGTH: f32 = 1e-4;

/// Global risk weights: dryness, heat, gust
const RISK_DRYNESS_WEIGHT: f32 = 0.4;
const RISK_HEAT_WEIGHT: f32 = 0.3;
const RISK_GUST_WEIGHT: f32 = 0.3;
const RISK_DRYNESS_EXPONENT: f32 = 1.5;
const RISK_HEAT_EXPONENT: f32 = 2.0;
const RISK_GUST_EXPONENT: f32 = 1.5;

/// Spatial and temporal feature size of one noise channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseScale {
    /// Feature size in tiles
    pub field: f32,
    /// Feature duration in simulated seconds
    pub time: f32,
}

impl NoiseScale {
    pub const fn new(field: f32, time: f32) -> Self {
        Self { field, time }
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        require_positive(name, self.field)?;
        require_positive(name, self.time)
    }
}

/// How relative humidity is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HumidityMode {
    /// Same humidity everywhere, all the time
    Fixed { percent: f32 },
    /// Noise-driven humidity between `min` and `max` percent
    Noise { min: f32, max: f32 },
}

impl Default for HumidityMode {
    /// A dry baseline that keeps the scenario in a high fire-risk regime
    fn default() -> Self {
        HumidityMode::Fixed { percent: 20.0 }
    }
}

/// Weather field tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Coldest temperature the field produces (°F)
    pub temperature_min: f32,
    /// Hottest temperature the field produces (°F)
    pub temperature_max: f32,
    /// Strongest wind the field produces (mph)
    pub wind_speed_max: f32,
    pub humidity: HumidityMode,
    pub temperature_scale: NoiseScale,
    pub wind_scale: NoiseScale,
    pub direction_scale: NoiseScale,
    pub humidity_scale: NoiseScale,
    /// Front rotation in radians per simulated second
    pub front_rotation_rate: f32,
    /// Share of local noise in the wind direction blend, the rest is the front
    pub local_direction_weight: f32,
    /// Overall multiplier of the weather influence score
    pub influence_scale: f32,
    /// Weight of the dryness × heat term in the influence score
    pub drought_weight: f32,
    /// Weight of the wind term in the influence score
    pub wind_weight: f32,
    /// Exponent applied to normalized wind speed (> 1 is superlinear)
    pub wind_exponent: f32,
    /// Memoize noise lookups between ticks
    pub caching: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            temperature_min: 60.0,
            temperature_max: 100.0,
            wind_speed_max: 40.0,
            humidity: HumidityMode::default(),
            temperature_scale: NoiseScale::new(40.0, 600.0),
            wind_scale: NoiseScale::new(25.0, 300.0),
            direction_scale: NoiseScale::new(60.0, 900.0),
            humidity_scale: NoiseScale::new(50.0, 1200.0),
            front_rotation_rate: 0.005,
            local_direction_weight: 0.6,
            influence_scale: 30.0,
            drought_weight: 0.6,
            wind_weight: 0.4,
            wind_exponent: 1.5,
            caching: true,
        }
    }
}

impl WeatherConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.temperature_min.is_finite()
            && self.temperature_max.is_finite()
            && self.temperature_min < self.temperature_max)
        {
            return Err(SimError::parameter(
                "temperature_range",
                format!(
                    "min must be below max, got {}..{}",
                    self.temperature_min, self.temperature_max
                ),
            ));
        }
        require_positive("temperature_max", self.temperature_max)?;
        require_positive("wind_speed_max", self.wind_speed_max)?;
        match self.humidity {
            HumidityMode::Fixed { percent } => {
                if !(0.0..=100.0).contains(&percent) {
                    return Err(SimError::parameter(
                        "humidity",
                        format!("fixed humidity must be within [0, 100], got {percent}"),
                    ));
                }
            }
            HumidityMode::Noise { min, max } => {
                if !(0.0..=100.0).contains(&min) || !(0.0..=100.0).contains(&max) || min > max {
                    return Err(SimError::parameter(
                        "humidity",
                        format!("noise humidity range must be within [0, 100], got {min}..{max}"),
                    ));
                }
            }
        }
        self.temperature_scale.validate("temperature_scale")?;
        self.wind_scale.validate("wind_scale")?;
        self.direction_scale.validate("direction_scale")?;
        self.humidity_scale.validate("humidity_scale")?;
        require_non_negative("front_rotation_rate", self.front_rotation_rate)?;
        if !(0.0..=1.0).contains(&self.local_direction_weight) {
            return Err(SimError::parameter(
                "local_direction_weight",
                format!("must be within [0, 1], got {}", self.local_direction_weight),
            ));
        }
        require_non_negative("influence_scale", self.influence_scale)?;
        require_non_negative("drought_weight", self.drought_weight)?;
        require_non_negative("wind_weight", self.wind_weight)?;
        if !(self.wind_exponent.is_finite() && self.wind_exponent >= 1.0) {
            return Err(SimError::parameter(
                "wind_exponent",
                format!("must be >= 1, got {}", self.wind_exponent),
            ));
        }
        Ok(())
    }
}

/// Memo key built from the exact bit patterns of a lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SampleKey {
    layer: u32,
    field_scale: u32,
    time_scale: u32,
    x: u32,
    y: u32,
    t: u32,
}

/// Time-evolving weather over a `width x height` map
#[derive(Debug)]
pub struct WeatherField {
    noise: ValueNoise,
    config: WeatherConfig,
    width: usize,
    height: usize,
    /// Accumulated simulated seconds
    global_time: f32,
    /// Rotating direction bias in `[0, 2π)`
    front_angle: f32,
    cache: RefCell<FxHashMap<SampleKey, f32>>,
}

impl WeatherField {
    /// Create a weather field for a map, seeded independently of any other run
    pub fn new(width: usize, height: usize, seed: u64, config: WeatherConfig) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        config.validate()?;
        // Distinct stream from terrain noise built from the same scenario seed
        let noise_seed = ((seed >> 32) as u32) ^ (seed as u32) ^ 0x5EED_F1E1;
        Ok(Self {
            noise: ValueNoise::new(noise_seed),
            config,
            width,
            height,
            global_time: 0.0,
            front_angle: 0.0,
            cache: RefCell::new(FxHashMap::default()),
        })
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    pub fn global_time(&self) -> f32 {
        self.global_time
    }

    pub fn front_angle(&self) -> f32 {
        self.front_angle
    }

    /// Number of memoized lookups currently held
    pub fn cached_samples(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Advance simulated time and rotate the front
    ///
    /// Negative or non-finite `dt` is ignored.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring invalid weather tick dt={}", dt);
            return;
        }
        self.global_time += dt;
        self.front_angle = (self.front_angle + self.config.front_rotation_rate * dt).rem_euclid(TAU);
        self.cache.get_mut().clear();
        debug!(
            "Weather tick: t={:.1}s, front={:.3}rad",
            self.global_time, self.front_angle
        );
    }

    /// Coherent noise value in [0, 1] at `(x / field_scale, y / field_scale, t / time_scale)`
    ///
    /// `t` defaults to the field's current time. Pure in its inputs: caching
    /// never changes the result.
    pub fn sample(&self, field_scale: f32, time_scale: f32, x: f32, y: f32, t: Option<f32>) -> f32 {
        self.sample_layer(LAYER_BASE, field_scale, time_scale, x, y, t)
    }

    fn sample_layer(
        &self,
        layer: u32,
        field_scale: f32,
        time_scale: f32,
        x: f32,
        y: f32,
        t: Option<f32>,
    ) -> f32 {
        let t = t.unwrap_or(self.global_time);
        let compute = || {
            let v = self
                .noise
                .sample_3d(x / field_scale, y / field_scale, t / time_scale, layer);
            ((v + 1.0) * 0.5).clamp(0.0, 1.0)
        };

        if !self.config.caching {
            return compute();
        }

        let key = SampleKey {
            layer,
            field_scale: field_scale.to_bits(),
            time_scale: time_scale.to_bits(),
            x: x.to_bits(),
            y: y.to_bits(),
            t: t.to_bits(),
        };
        if let Some(&cached) = self.cache.borrow().get(&key) {
            return cached;
        }
        let value = compute();
        let mut cache = self.cache.borrow_mut();
        if cache.len() >= MAX_CACHE_ENTRIES {
            cache.clear();
        }
        cache.insert(key, value);
        value
    }

    fn sample_scaled(&self, layer: u32, scale: NoiseScale, x: f32, y: f32, t: Option<f32>) -> f32 {
        self.sample_layer(layer, scale.field, scale.time, x, y, t)
    }

    /// Weather at a map position at the current time
    pub fn local_weather(&self, x: f32, y: f32) -> WeatherSample {
        self.local_weather_at(x, y, None)
    }

    /// Weather at a map position, at time `t` or the current time
    pub fn local_weather_at(&self, x: f32, y: f32, t: Option<f32>) -> WeatherSample {
        let cfg = &self.config;

        let heat = self.sample_scaled(LAYER_TEMPERATURE, cfg.temperature_scale, x, y, t);
        let temperature =
            cfg.temperature_min + heat * (cfg.temperature_max - cfg.temperature_min);

        let humidity = match cfg.humidity {
            HumidityMode::Fixed { percent } => percent,
            HumidityMode::Noise { min, max } => {
                let wet = self.sample_scaled(LAYER_HUMIDITY, cfg.humidity_scale, x, y, t);
                min + wet * (max - min)
            }
        };

        let gust = self.sample_scaled(LAYER_WIND_SPEED, cfg.wind_scale, x, y, t);
        let wind_speed = gust * cfg.wind_speed_max;

        let raw_bearing = self.sample_scaled(LAYER_WIND_DIRECTION, cfg.direction_scale, x, y, t) * TAU;
        let blended = bearing_vector(raw_bearing) * cfg.local_direction_weight
            + bearing_vector(self.front_angle) * (1.0 - cfg.local_direction_weight);
        let bearing = if blended.norm() < MIN_BLEND_LENGTH {
            self.front_angle
        } else {
            vector_bearing(&blended)
        };

        WeatherSample {
            temperature: Fahrenheit::new(temperature),
            humidity: Percent::new(humidity).clamp_to(0.0, 100.0),
            wind_speed: MilesPerHour::new(wind_speed),
            wind_direction: WindDirection::from_bearing(bearing),
        }
    }

    /// Fire danger contribution of a weather sample
    ///
    /// Non-negative, grows with dryness, heat and (superlinearly) wind.
    pub fn weather_influence(&self, sample: &WeatherSample) -> f32 {
        let cfg = &self.config;
        let dryness = (1.0 - sample.humidity.to_fraction()).clamp(0.0, 1.0);
        let heat = (*sample.temperature / cfg.temperature_max).max(0.0);
        let wind = (*sample.wind_speed / cfg.wind_speed_max).max(0.0);

        let drought_term = dryness * heat;
        let wind_term = wind.powf(cfg.wind_exponent);
        cfg.influence_scale * (cfg.drought_weight * drought_term + cfg.wind_weight * wind_term)
    }

    /// Map-wide risk in [0, 1], evaluated at the grid centre
    ///
    /// For display and scenario labeling only; the spread engine works per tile.
    pub fn global_risk(&self) -> f32 {
        let cfg = &self.config;
        let cx = (self.width / 2) as f32;
        let cy = (self.height / 2) as f32;
        let sample = self.local_weather(cx, cy);

        let dryness = (1.0 - sample.humidity.to_fraction())
            .clamp(0.0, 1.0)
            .powf(RISK_DRYNESS_EXPONENT);
        let heat = ((*sample.temperature - cfg.temperature_min)
            / (cfg.temperature_max - cfg.temperature_min))
            .clamp(0.0, 1.0)
            .powf(RISK_HEAT_EXPONENT);
        let gust = (*sample.wind_speed / cfg.wind_speed_max)
            .clamp(0.0, 1.0)
            .powf(RISK_GUST_EXPONENT);

        (RISK_DRYNESS_WEIGHT * dryness + RISK_HEAT_WEIGHT * heat + RISK_GUST_WEIGHT * gust)
            .clamp(0.0, 1.0)
    }

    /// Weather influence for every tile, row-major
    pub fn danger_map(&self) -> Vec<f32> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| self.weather_influence(&self.local_weather(x as f32, y as f32)))
            .collect()
    }
}
