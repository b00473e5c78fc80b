//! Biome selection thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds for ocean tiers, altitude bands and climate replacements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    /// Ocean shallower than this is plain ocean.
    pub shallow_ocean_depth: u8,
    /// Ocean at least this deep is deep ocean.
    pub deep_ocean_depth: u8,
    /// Ocean deeper than this is a trench.
    pub trench_depth: u8,

    /// Height units per altitude band.
    pub altitude_band_width: u8,

    /// Rainfall (mm) below which lowlands and hills dry out. A per-area
    /// offset in `[0, dry_rainfall_variance)` is added.
    pub dry_rainfall: f32,
    pub dry_rainfall_variance: u32,
    /// At or below this, dried biomes become desert rather than dunes/flats.
    pub arid_rainfall: f32,
    /// Badlands above this rainfall (plus variance) turn back to highlands.
    pub wet_badlands_rainfall: f32,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            shallow_ocean_depth: 3,
            deep_ocean_depth: 5,
            trench_depth: 9,
            altitude_band_width: 8,
            dry_rainfall: 90.0,
            dry_rainfall_variance: 40,
            arid_rainfall: 55.0,
            wet_badlands_rainfall: 420.0,
        }
    }
}

impl BiomeConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.altitude_band_width == 0 {
            return Err("altitude band width must be positive".into());
        }
        if !(self.shallow_ocean_depth <= self.deep_ocean_depth && self.deep_ocean_depth <= self.trench_depth) {
            return Err("ocean depth tiers must be ordered shallow <= deep <= trench".into());
        }
        Ok(())
    }
}
