//! Core types and utilities

pub mod noise;
pub mod units;

pub use noise::ValueNoise;
pub use units::*;
