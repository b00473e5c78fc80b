//! World-level noise fields sampled by the region stages.

use glam::Vec2;

use crate::noise::{sample_fractal_noise_2d, sample_ridged_noise_2d};

use super::TerrainConfig;

/// Pure functions of a grid coordinate shared by every region.
///
/// Because these never read region state, a stage can evaluate them for
/// points just outside its own cell and agree with the neighboring cell.
#[derive(Debug, Clone)]
pub struct NoiseFields {
    terrain: TerrainConfig,
    /// World bound radius in grid units.
    radius: Option<f32>,
}

impl NoiseFields {
    pub fn new(terrain: TerrainConfig, radius: Option<f32>) -> Self {
        Self { terrain, radius }
    }

    pub fn terrain(&self) -> &TerrainConfig {
        &self.terrain
    }

    /// Whether grid `(x, z)` lies inside the world bound.
    pub fn in_bounds(&self, x: i32, z: i32) -> bool {
        match self.radius {
            Some(r) => {
                let (fx, fz) = (x as f32 + 0.5, z as f32 + 0.5);
                fx * fx + fz * fz <= r * r
            }
            None => true,
        }
    }

    /// Continent value; positive is land. Land fades out toward the world bound.
    pub fn continent(&self, x: i32, z: i32) -> f32 {
        let pos = center(x, z);
        let mut value = sample_fractal_noise_2d(pos, &self.terrain.continent) + self.terrain.continentalness;
        if let Some(r) = self.radius {
            let distance = pos.length();
            if distance > r {
                return -1.0;
            }
            let fade_start = r * 0.85;
            if distance > fade_start {
                value -= (distance - fade_start) / (r - fade_start);
            }
        }
        value
    }

    pub fn is_land(&self, x: i32, z: i32) -> bool {
        self.continent(x, z) > 0.0
    }

    pub fn volcanic(&self, x: i32, z: i32) -> f32 {
        sample_fractal_noise_2d(center(x, z), &self.terrain.volcanic)
    }

    pub fn uplift(&self, x: i32, z: i32) -> f32 {
        sample_fractal_noise_2d(center(x, z), &self.terrain.uplift)
    }

    /// Ridged mountain field in [0, 1].
    pub fn mountains(&self, x: i32, z: i32) -> f32 {
        sample_ridged_noise_2d(center(x, z), &self.terrain.mountains)
    }

    /// Base land height for a positive continent value.
    pub fn land_height(&self, continent: f32) -> u8 {
        let max = self.terrain.max_land_height as f32;
        (continent * self.terrain.relief * max).clamp(0.0, max) as u8
    }

    /// Base ocean depth for a non-positive continent value, at least 1.
    pub fn ocean_depth(&self, continent: f32) -> u8 {
        let max = self.terrain.max_ocean_depth as f32;
        (-continent * self.terrain.relief * max).clamp(1.0, max) as u8
    }
}

#[inline]
fn center(x: i32, z: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, z as f32 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_the_bound_is_ocean() {
        let fields = NoiseFields::new(TerrainConfig::with_seed(42), Some(100.0));
        assert!(!fields.in_bounds(200, 0));
        assert!(!fields.is_land(200, 0));
        assert!(!fields.is_land(0, -150));
        assert!(fields.in_bounds(10, 10));
    }

    #[test]
    fn unbounded_world_has_land_and_ocean() {
        let fields = NoiseFields::new(TerrainConfig::with_seed(42), None);
        let mut land = 0;
        let total = 60 * 60;
        for z in 0..60 {
            for x in 0..60 {
                if fields.is_land(x * 16, z * 16) {
                    land += 1;
                }
            }
        }
        assert!(land > 0 && land < total, "expected a mix of land and ocean, got {} / {}", land, total);
    }

    #[test]
    fn heights_scale_with_continent() {
        let fields = NoiseFields::new(TerrainConfig::default(), None);
        assert_eq!(fields.land_height(0.0), 0);
        assert!(fields.land_height(0.2) > fields.land_height(0.05));
        assert_eq!(fields.land_height(5.0), fields.terrain().max_land_height);
        assert_eq!(fields.ocean_depth(0.0), 1);
        assert_eq!(fields.ocean_depth(-5.0), fields.terrain().max_ocean_depth);
    }
}
