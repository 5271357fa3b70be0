//! Semantic unit types for weather quantities
//!
//! Newtype wrappers keep temperature, humidity and wind speed from being
//! mixed up when they travel together in a [`WeatherSample`](crate::weather::WeatherSample).
//!
//! # Usage
//! ```
//! use wildfire_core::core_types::units::{Fahrenheit, Percent};
//!
//! let temp = Fahrenheit::new(86.0);
//! assert!((*temp.to_celsius() - 30.0).abs() < 0.01);
//!
//! let humidity = Percent::new(25.0);
//! assert!((humidity.to_fraction() - 0.25).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Implements the shared newtype plumbing: total ordering, `Deref` to the raw
/// value, raw conversions and `Display` with a unit suffix.
macro_rules! unit_newtype {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f32;
            #[inline]
            fn deref(&self) -> &f32 {
                &self.0
            }
        }

        impl $name {
            /// Wrap a raw value
            #[inline]
            #[must_use]
            pub const fn new(value: f32) -> Self {
                $name(value)
            }

            /// Get the raw f32 value
            #[inline]
            #[must_use]
            pub fn value(self) -> f32 {
                self.0
            }

            /// Clamp into `[min, max]`
            #[inline]
            #[must_use]
            pub fn clamp_to(self, min: f32, max: f32) -> Self {
                $name(self.0.clamp(min, max))
            }
        }

        impl From<f32> for $name {
            fn from(v: f32) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f32 {
            fn from(v: $name) -> f32 {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if let Some(precision) = f.precision() {
                    write!(f, "{:.*}{}", precision, self.0, $suffix)
                } else {
                    write!(f, "{}{}", self.0, $suffix)
                }
            }
        }
    };
}

/// Air temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fahrenheit(f32);

unit_newtype!(Fahrenheit, "°F");

impl Fahrenheit {
    /// Convert to degrees Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius((self.0 - 32.0) * 5.0 / 9.0)
    }
}

/// Air temperature in degrees Celsius (display/export only)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f32);

unit_newtype!(Celsius, "°C");

/// Relative humidity as a percentage (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f32);

unit_newtype!(Percent, "%");

impl Percent {
    /// Convert to a fraction (0-1)
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f32 {
        self.0 / 100.0
    }
}

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MilesPerHour(f32);

unit_newtype!(MilesPerHour, " mph");
