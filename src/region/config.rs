//! Terrain shaping parameters for the region stages.

use serde::{Deserialize, Serialize};

use crate::noise::FractalNoiseConfig;

/// Noise fields and thresholds used by the rock, mountain and height stages.
///
/// Heights are in abstract units; [`GeneratorConfig`](crate::GeneratorConfig)
/// converts them to blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Continent field. Positive values are land.
    pub continent: FractalNoiseConfig,
    /// Bias added to the continent field; raises the land fraction.
    pub continentalness: f32,
    /// Scale from continent value to land height / ocean depth.
    pub relief: f32,
    pub max_land_height: u8,
    pub max_ocean_depth: u8,

    /// Volcanic rock field and its threshold.
    pub volcanic: FractalNoiseConfig,
    pub volcanic_threshold: f32,

    /// Uplift (metamorphic) rock field and its threshold.
    pub uplift: FractalNoiseConfig,
    pub uplift_threshold: f32,

    /// Ridged mountain field in [0, 1].
    pub mountains: FractalNoiseConfig,
    pub mountain_threshold: f32,
    /// Threshold reduction next to points already at `high_point_height`.
    pub mountain_proximity_bonus: f32,
    /// Threshold reduction on uplift rock.
    pub mountain_uplift_bonus: f32,
    pub high_point_height: u8,
    /// Height added to a mountain at the peak of its ridge.
    pub mountain_height: u8,
    /// Ocean within this many grid units makes a mountain coastal.
    pub coastal_mountain_radius: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            continent: FractalNoiseConfig::continents(42),
            continentalness: 0.02,
            relief: 2.5,
            max_land_height: 24,
            max_ocean_depth: 15,

            volcanic: FractalNoiseConfig::ranges(43),
            volcanic_threshold: 0.45,

            uplift: FractalNoiseConfig::ranges(44),
            uplift_threshold: 0.4,

            mountains: FractalNoiseConfig::ranges(45),
            mountain_threshold: 0.82,
            mountain_proximity_bonus: 0.06,
            mountain_uplift_bonus: 0.08,
            high_point_height: 14,
            mountain_height: 20,
            coastal_mountain_radius: 2,
        }
    }
}

impl TerrainConfig {
    /// Defaults with every noise field reseeded from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let base = seed as i32 ^ (seed >> 32) as i32;
        let defaults = Self::default();
        Self {
            continent: defaults.continent.reseeded(base),
            volcanic: defaults.volcanic.reseeded(base.wrapping_add(101)),
            uplift: defaults.uplift.reseeded(base.wrapping_add(202)),
            mountains: defaults.mountains.reseeded(base.wrapping_add(303)),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, field) in [
            ("continent", &self.continent),
            ("volcanic", &self.volcanic),
            ("uplift", &self.uplift),
            ("mountains", &self.mountains),
        ] {
            if !field.is_valid() {
                return Err(format!("{} noise needs at least one octave and a positive frequency", name));
            }
        }
        if !(self.relief.is_finite() && self.relief > 0.0) {
            return Err("relief must be positive".into());
        }
        if !(0.0..1.0).contains(&self.mountain_threshold) {
            return Err("mountain threshold must lie in [0, 1)".into());
        }
        if self.max_land_height as u16 + self.mountain_height as u16 > 250 {
            return Err("land height plus mountain height must stay below 250".into());
        }
        Ok(())
    }
}
