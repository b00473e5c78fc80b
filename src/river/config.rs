//! River and lake configuration.

use serde::{Deserialize, Serialize};

/// Parameters for the river and lake stage.
///
/// Distances and sizes are in grid units unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverConfig {
    /// Chance that an eligible interior land point starts a river.
    pub source_chance: f32,
    /// Sources must be at least this far from the ocean.
    pub min_source_distance: u8,
    /// Drains are coastal or lakeside land at most this high.
    pub max_drain_height: u8,
    /// Upper bound on rivers traced per region.
    pub max_rivers: usize,

    /// Path steps between river vertices.
    pub vertex_spacing: usize,
    /// Random offset applied to each interior vertex, as a fraction of a grid unit.
    pub jitter: f32,
    /// Subdivision depth of each river edge.
    pub fractal_depth: u32,
    /// Half width of the river channel.
    pub width: f32,

    /// Chance that a basin becomes a lake.
    pub lake_chance: f32,
    /// Basins closer than this to the ocean drain to it instead of pooling.
    pub lake_search_radius: u8,
    /// Height units above the basin floor that still flood.
    pub lake_depth: u8,
    pub lake_max_size: usize,
    /// Upper bound on lakes placed per region.
    pub max_lakes: usize,

    /// Rivers and lakes keep this many points away from the region border.
    pub edge_margin: u8,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            source_chance: 0.04,
            min_source_distance: 6,
            max_drain_height: 6,
            max_rivers: 24,
            vertex_spacing: 3,
            jitter: 0.3,
            fractal_depth: 4,
            width: 0.35,
            lake_chance: 0.5,
            lake_search_radius: 12,
            lake_depth: 2,
            lake_max_size: 40,
            max_lakes: 4,
            edge_margin: 2,
        }
    }
}

impl RiverConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (name, chance) in [("source_chance", self.source_chance), ("lake_chance", self.lake_chance)] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("{} must be in [0, 1], got {}", name, chance));
            }
        }
        if self.vertex_spacing == 0 {
            return Err("vertex_spacing must be positive".into());
        }
        if self.fractal_depth > 12 {
            return Err(format!("fractal_depth {} is too deep (max 12)", self.fractal_depth));
        }
        if !(self.width > 0.0) {
            return Err("river width must be positive".into());
        }
        if !(0.0..0.5).contains(&self.jitter) {
            return Err("jitter must be in [0, 0.5)".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert!(RiverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bad_chance_is_rejected() {
        let cfg = RiverConfig {
            source_chance: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
