//! Mutable state threaded through the stages of one region.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::layer::{Area, AreaFactory};
use crate::world::GeneratorConfig;

use super::{NoiseFields, Region, ORTHOGONAL};

/// Everything a stage may read or write while generating one region.
///
/// The areas and the random stream belong to this generation run only, so
/// stages never contend with other threads.
pub struct RegionContext<'a> {
    pub region: &'a mut Region,
    pub fields: &'a NoiseFields,
    pub config: &'a GeneratorConfig,
    pub biome_area: Area,
    pub rock_area: Area,
    /// Sequential randomness for decisions local to this region.
    pub random: ChaCha8Rng,
    /// Seed of this region's cell.
    pub seed: u64,
}

impl<'a> RegionContext<'a> {
    pub fn new(
        region: &'a mut Region,
        fields: &'a NoiseFields,
        config: &'a GeneratorConfig,
        biome_areas: &AreaFactory,
        rock_areas: &AreaFactory,
        seed: u64,
    ) -> Self {
        Self {
            region,
            fields,
            config,
            biome_area: biome_areas.create(),
            rock_area: rock_areas.create(),
            random: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Land test that also works past the region border.
    ///
    /// Inside the region it reads the point; outside it evaluates the same
    /// continent field the neighbor region will use.
    pub fn land_at(&self, x: i32, z: i32) -> bool {
        match self.region.index(x, z) {
            Some(index) => self.region.points()[index].land(),
            None => self.fields.is_land(x, z),
        }
    }

    /// Base land height at `(x, z)`, zero for ocean. Past the border this is the
    /// height before any stage of the neighbor region has run.
    pub fn land_height_at(&self, x: i32, z: i32) -> u8 {
        match self.region.index(x, z) {
            Some(index) => self.region.points()[index].base_land_height,
            None => {
                let continent = self.fields.continent(x, z);
                if continent > 0.0 {
                    self.fields.land_height(continent)
                } else {
                    0
                }
            }
        }
    }

    /// True if any orthogonal neighbor of `(x, z)` is ocean.
    pub fn borders_ocean(&self, x: i32, z: i32) -> bool {
        ORTHOGONAL.iter().any(|&(dx, dz)| !self.land_at(x + dx, z + dz))
    }

    /// True if any point within `radius` (Chebyshev) of `(x, z)` is ocean.
    pub fn ocean_within(&self, x: i32, z: i32, radius: i32) -> bool {
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                if !self.land_at(x + dx, z + dz) {
                    return true;
                }
            }
        }
        false
    }
}
