//! Temperature model.

use glam::Vec2;

use crate::noise::sample_fractal_noise_2d;

use super::util::{map_unit, triangle};
use super::ClimateConfig;

/// Sea-level temperature (°C) at grid point `(x, z)`.
///
/// A triangle wave along z gives alternating warm and cold latitude bands;
/// fractal noise adds up to `temperature_variance` either way.
pub fn temperature_c(x: i32, z: i32, cfg: &ClimateConfig) -> f32 {
    let base = if cfg.temperature_scale == 0.0 {
        cfg.constant_temperature
    } else {
        map_unit(
            triangle(1.0 / cfg.temperature_scale, z as f32),
            cfg.min_temperature,
            cfg.max_temperature,
        )
    };
    let noise = sample_fractal_noise_2d(Vec2::new(x as f32 + 0.5, z as f32 + 0.5), &cfg.temperature_noise);
    base + noise.clamp(-1.0, 1.0) * cfg.temperature_variance
}

/// Applies the altitude lapse to a sea-level temperature.
pub fn with_lapse(temperature: f32, height_units: i32, cfg: &ClimateConfig) -> f32 {
    temperature - cfg.lapse_rate_per_unit * height_units.max(0) as f32
}
