//! World facade: configuration and the block-coordinate query contracts.
//!
//! [`WorldGenerator`] owns a [`RegionGenerator`] and the world-level soil and
//! cave samplers. Every query is a pure function of the seed and the
//! coordinate; regions are generated on first use and shared afterwards.

mod config;

pub use config::{ConfigError, GeneratorConfig, LayerConfig, MAX_POINTS_PER_SIDE};

use std::sync::Arc;

use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::debug;

use crate::biomes::BiomeId;
use crate::density::CaveCarver;
use crate::layer::{Area, DataLayer, Drainage, PhLevel};
use crate::pipeline::Pipeline;
use crate::region::{Point, RegionGenerator, RegionPartition};
use crate::rocks::Rock;

/// Answers biome, rock, height, climate, water, soil and cave queries for
/// block coordinates.
pub struct WorldGenerator {
    regions: RegionGenerator,
    caves: CaveCarver,
    ph: Mutex<Area>,
    drainage: Mutex<Area>,
}

impl WorldGenerator {
    /// Generator running the standard seven-stage pipeline.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_pipeline(config, Pipeline::standard())
    }

    /// Generator running a custom pipeline. Configuration and pipeline are
    /// both validated here; queries never fail.
    pub fn with_pipeline(config: GeneratorConfig, pipeline: Pipeline) -> Result<Self, ConfigError> {
        let layers = &config.layers;
        let ph = layers.factory("ph", &layers.ph, config.seed)?.create();
        let drainage = layers.factory("drainage", &layers.drainage, config.seed)?.create();
        let caves = CaveCarver::new(&config.caves);
        let regions = RegionGenerator::new(config, pipeline)?;

        Ok(Self {
            regions,
            caves,
            ph: Mutex::new(ph),
            drainage: Mutex::new(drainage),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.regions.config()
    }

    pub fn generator(&self) -> &RegionGenerator {
        &self.regions
    }

    pub fn caves(&self) -> &CaveCarver {
        &self.caves
    }

    /// The point covering block `(x, z)`, or [`Point::ABSENT`] beyond the
    /// world bound.
    pub fn point_at(&self, x: i32, z: i32) -> Point {
        let (gx, gz) = self.regions.grid_of_block(x, z);
        self.grid_point(gx, gz)
    }

    pub fn biome_at(&self, x: i32, z: i32) -> BiomeId {
        self.point_at(x, z).biome
    }

    pub fn rock_at(&self, x: i32, z: i32) -> Rock {
        self.point_at(x, z).rock
    }

    /// Surface height in blocks.
    ///
    /// Interpolates the four nearest point heights, then lowers the surface
    /// toward the river bed one block below sea level near a river channel.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let (gx, gz) = self.grid_position(x, z);
        let (fx, fz) = (gx - 0.5, gz - 0.5);
        let (x0, z0) = (fx.floor() as i32, fz.floor() as i32);
        let (tx, tz) = (fx - x0 as f32, fz - z0 as f32);

        let h00 = self.surface(&self.grid_point(x0, z0));
        let h10 = self.surface(&self.grid_point(x0 + 1, z0));
        let h01 = self.surface(&self.grid_point(x0, z0 + 1));
        let h11 = self.surface(&self.grid_point(x0 + 1, z0 + 1));
        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        let mut height = top + (bottom - top) * tz;

        let bed = (self.config().sea_level - 1) as f32;
        if height > bed {
            let width = self.config().rivers.width;
            let reach = self.regions.river_reach();
            if let Some(distance) = self.partition_of(x, z).nearest_river(gx, gz, reach) {
                let t = ((distance - width) / (reach - width)).clamp(0.0, 1.0);
                let ease = t * t * (3.0 - 2.0 * t);
                height = bed + (height - bed) * ease;
            }
        }
        height.round() as i32
    }

    /// `(temperature °C, rainfall mm)` at block `(x, z)`.
    pub fn climate_at(&self, x: i32, z: i32) -> (f32, f32) {
        let point = self.point_at(x, z);
        (point.temperature, point.rainfall)
    }

    pub fn river_or_lake_at(&self, x: i32, z: i32) -> bool {
        let (gx, gz) = self.regions.grid_of_block(x, z);
        if !self.regions.fields().in_bounds(gx, gz) {
            return false;
        }
        let (fx, fz) = self.grid_position(x, z);
        self.partition_of(x, z).river_or_lake_at(fx, fz)
    }

    /// Combined spaghetti cave density; negative is open.
    pub fn cave_density_at(&self, x: i32, y: i32, z: i32) -> f64 {
        self.caves.density_at(x, y, z)
    }

    pub fn soil_at(&self, x: i32, z: i32) -> (PhLevel, Drainage) {
        let (gx, gz) = self.regions.grid_of_block(x, z);
        let ph = PhLevel::from_layer_value(self.ph.lock().get(gx, gz));
        let drainage = Drainage::from_layer_value(self.drainage.lock().get(gx, gz));
        (ph, drainage)
    }

    /// Generates the given cells in parallel. Overlapping neighborhoods are
    /// fine: region stages are sequential, so a worker waiting on a cell
    /// never picks up other cache work.
    pub fn prefetch(&self, cells: &[(i32, i32)]) {
        cells.par_iter().for_each(|&(cell_x, cell_z)| {
            self.regions.partition(cell_x, cell_z);
        });
        debug!(cells = cells.len(), generated = self.regions.generated_count(), "prefetched cells");
    }

    /// Block center in fractional grid units.
    fn grid_position(&self, x: i32, z: i32) -> (f32, f32) {
        let width = self.config().grid_width as f32;
        ((x as f32 + 0.5) / width, (z as f32 + 0.5) / width)
    }

    fn partition_of(&self, x: i32, z: i32) -> Arc<RegionPartition> {
        self.regions.get_or_create_region(x, z)
    }

    fn grid_point(&self, gx: i32, gz: i32) -> Point {
        if !self.regions.fields().in_bounds(gx, gz) {
            return Point::ABSENT;
        }
        let per_cell = self.config().points_per_cell() as i32;
        let partition = self.regions.partition(gx.div_euclid(per_cell), gz.div_euclid(per_cell));
        *partition.at(gx, gz)
    }

    /// Surface height of a point in blocks. Absent points sit at the deepest
    /// ocean floor.
    fn surface(&self, point: &Point) -> f32 {
        let config = self.config();
        let sea_level = config.sea_level as f32;
        if point.is_absent() {
            return sea_level - (config.terrain.max_ocean_depth as i32 * config.ocean_step) as f32;
        }
        if point.land() {
            sea_level + (point.base_land_height as i32 * config.land_step) as f32
        } else {
            sea_level - (point.base_ocean_depth as i32 * config.ocean_step) as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> WorldGenerator {
        let config = GeneratorConfig {
            cell_size: 128,
            ..GeneratorConfig::with_seed(seed)
        };
        WorldGenerator::new(config).expect("valid world")
    }

    const SAMPLES: [(i32, i32); 6] = [(0, 0), (37, -90), (-300, 411), (130, 129), (-1, -1), (900, -650)];

    #[test]
    fn biome_at_origin_is_stable() {
        let world = WorldGenerator::new(GeneratorConfig::with_seed(42)).expect("valid world");
        assert_eq!(world.config().cell_size, 512);
        let first = world.biome_at(0, 0);
        let second = world.biome_at(0, 0);
        assert_eq!(first, second);
        assert!(!first.is_marker());
        assert_eq!(world.generator().generated_count(), 9, "one partition and its neighbors");
    }

    #[test]
    fn beyond_the_world_bound_is_ocean() {
        let config = GeneratorConfig {
            cell_size: 128,
            world_radius: Some(2048),
            ..GeneratorConfig::with_seed(42)
        };
        let world = WorldGenerator::new(config).expect("valid world");

        let (x, z) = (2048 + 6000, -500);
        assert!(world.biome_at(x, z).is_ocean());
        assert!(world.point_at(x, z).is_absent());
        assert!(!world.river_or_lake_at(x, z));
        assert!(world.height_at(x, z) < world.config().sea_level);
        assert_eq!(world.generator().generated_count(), 0, "no region needed past the bound");
    }

    #[test]
    fn queries_do_not_depend_on_order() {
        let forward = small(7);
        let backward = small(7);
        // Unrelated cells warmed up first on one side only.
        forward.prefetch(&[(12, -4), (-9, 3)]);

        let a: Vec<_> = SAMPLES
            .iter()
            .map(|&(x, z)| (forward.biome_at(x, z), forward.rock_at(x, z), forward.height_at(x, z), forward.climate_at(x, z)))
            .collect();
        let mut b: Vec<_> = SAMPLES
            .iter()
            .rev()
            .map(|&(x, z)| (backward.biome_at(x, z), backward.rock_at(x, z), backward.height_at(x, z), backward.climate_at(x, z)))
            .collect();
        b.reverse();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_queries_match_sequential() {
        let world = small(3);
        let sequential: Vec<_> = SAMPLES.iter().map(|&(x, z)| world.height_at(x, z)).collect();
        let fresh = small(3);
        let parallel: Vec<_> = SAMPLES.par_iter().map(|&(x, z)| fresh.height_at(x, z)).collect();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn prefetching_overlapping_cells_completes() {
        let (done, finished) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let world = small(21);
            let cells: Vec<(i32, i32)> = (0..8).flat_map(|z| (0..8).map(move |x| (x, z))).collect();
            world.prefetch(&cells);
            // Each partition also generates its ring of neighbors.
            let _ = done.send(world.generator().generated_count());
        });
        let generated = finished
            .recv_timeout(std::time::Duration::from_secs(60))
            .expect("prefetch of overlapping cells did not finish");
        assert_eq!(generated, 10 * 10);
    }

    #[test]
    fn river_channels_are_carved_below_sea_level() {
        let world = small(42);
        let grid_width = world.config().grid_width as f32;
        let bed = world.config().sea_level - 1;
        for cell_z in -2..=2 {
            for cell_x in -2..=2 {
                let partition = world.generator().partition(cell_x, cell_z);
                for edge in partition.rivers() {
                    let source = edge.source();
                    let (x, z) = ((source.x * grid_width).floor() as i32, (source.y * grid_width).floor() as i32);
                    assert!(world.river_or_lake_at(x, z), "river source at {:?} is not water", (x, z));
                    assert!(world.height_at(x, z) <= bed, "river source at {:?} not carved", (x, z));
                }
            }
        }
    }

    #[test]
    fn soil_is_deterministic() {
        let a = small(11);
        let b = small(11);
        for &(x, z) in &SAMPLES {
            assert_eq!(a.soil_at(x, z), b.soil_at(x, z));
        }
        let (ph, drainage) = a.soil_at(0, 0);
        assert!((ph.id() as usize) < PhLevel::count());
        assert!((drainage.id() as usize) < Drainage::count());
    }

    #[test]
    fn cave_density_is_clamped_and_repeatable() {
        let world = small(5);
        for y in (-64..=320).step_by(16) {
            let d = world.cave_density_at(40, y, -70);
            assert!((-1.0..=1.0).contains(&d), "density {d} at y={y}");
            assert_eq!(d, world.cave_density_at(40, y, -70));
        }
    }

    #[test]
    fn invalid_config_fails_at_construction() {
        let config = GeneratorConfig {
            cell_size: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(WorldGenerator::new(config), Err(ConfigError::InvalidCellSize(0))));
    }
}
