//! Rainfall model.

use glam::Vec2;

use crate::noise::sample_fractal_noise_2d;

use super::util::{map_unit, triangle};
use super::ClimateConfig;

/// Annual rainfall (mm) at grid point `(x, z)`, before coastal effects.
///
/// Bands run along x. The noise term is skewed toward drying, mapping onto
/// `[rainfall_variance_low, rainfall_variance_high]`.
pub fn rainfall_mm(x: i32, z: i32, cfg: &ClimateConfig) -> f32 {
    let base = if cfg.rainfall_scale == 0.0 {
        cfg.constant_rainfall
    } else {
        map_unit(
            triangle(1.0 / cfg.rainfall_scale, x as f32),
            cfg.min_rainfall,
            cfg.max_rainfall,
        )
    };
    let noise = sample_fractal_noise_2d(Vec2::new(x as f32 + 0.5, z as f32 + 0.5), &cfg.rainfall_noise);
    let variance = map_unit(noise, cfg.rainfall_variance_low, cfg.rainfall_variance_high);
    (base + variance).clamp(cfg.min_rainfall, cfg.max_rainfall)
}

/// Adds the coastal bonus for a land point `distance` grid units from the ocean.
pub fn with_coastal_bonus(rainfall: f32, distance: u8, cfg: &ClimateConfig) -> f32 {
    if cfg.coastal_rainfall_distance <= 0.0 {
        return rainfall;
    }
    let falloff = (1.0 - distance as f32 / cfg.coastal_rainfall_distance).max(0.0);
    (rainfall + cfg.coastal_rainfall_bonus * falloff).clamp(cfg.min_rainfall, cfg.max_rainfall)
}
