//! Climate configuration parameters.

use serde::{Deserialize, Serialize};

use crate::noise::FractalNoiseConfig;

/// Configuration for the region climate annotation.
///
/// Units:
/// - temperatures: °C
/// - rainfall: mm per year
/// - scales and distances: grid units
/// - elevation: height units (see [`TerrainConfig`](crate::region::TerrainConfig))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    // Temperature bands (periodic along z)
    /// Length of one full temperature cycle. Zero disables the bands.
    pub temperature_scale: f32,
    pub constant_temperature: f32,
    pub min_temperature: f32,
    pub max_temperature: f32,
    /// Amplitude of the noise added on top of the bands.
    pub temperature_variance: f32,
    pub lapse_rate_per_unit: f32,
    pub temperature_noise: FractalNoiseConfig,

    // Rainfall bands (periodic along x)
    /// Length of one full rainfall cycle. Zero disables the bands.
    pub rainfall_scale: f32,
    pub constant_rainfall: f32,
    pub min_rainfall: f32,
    pub max_rainfall: f32,
    /// Noise is mapped from [-1, 1] onto `[rainfall_variance_low, rainfall_variance_high]`.
    pub rainfall_variance_low: f32,
    pub rainfall_variance_high: f32,
    /// Extra rainfall at the shore, fading to zero at `coastal_rainfall_distance`.
    pub coastal_rainfall_bonus: f32,
    pub coastal_rainfall_distance: f32,
    pub rainfall_noise: FractalNoiseConfig,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            temperature_scale: 2500.0,
            constant_temperature: 15.0,
            min_temperature: -20.0,
            max_temperature: 30.0,
            temperature_variance: 3.0,
            lapse_rate_per_unit: 0.4,
            temperature_noise: FractalNoiseConfig::climate(1),

            rainfall_scale: 2500.0,
            constant_rainfall: 250.0,
            min_rainfall: 0.0,
            max_rainfall: 500.0,
            rainfall_variance_low: -80.0,
            rainfall_variance_high: 40.0,
            coastal_rainfall_bonus: 60.0,
            coastal_rainfall_distance: 8.0,
            rainfall_noise: FractalNoiseConfig::climate(2),
        }
    }
}

impl ClimateConfig {
    /// Defaults with both noise fields reseeded from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let base = (seed >> 16) as i32;
        let defaults = Self::default();
        Self {
            temperature_noise: defaults.temperature_noise.reseeded(base.wrapping_add(7)),
            rainfall_noise: defaults.rainfall_noise.reseeded(base.wrapping_add(13)),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.temperature_scale < 0.0 || self.rainfall_scale < 0.0 {
            return Err("climate scales must not be negative".into());
        }
        if self.min_temperature > self.max_temperature {
            return Err("min temperature exceeds max temperature".into());
        }
        if self.min_rainfall > self.max_rainfall {
            return Err("min rainfall exceeds max rainfall".into());
        }
        if !self.temperature_noise.is_valid() || !self.rainfall_noise.is_valid() {
            return Err("climate noise needs at least one octave and a positive frequency".into());
        }
        Ok(())
    }
}
