//! Lazy, memoized region generation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use tracing::{debug, info};

use crate::layer::AreaFactory;
use crate::pipeline::{Pipeline, StageId};
use crate::random::cell_seed;
use crate::world::{ConfigError, GeneratorConfig};

use super::{CellCache, NoiseFields, Region, RegionContext, RegionPartition};

/// Generates each partition cell at most once and serves it from then on.
///
/// Requests for the same cell from several threads run the pipeline once;
/// the others wait for that result. Different cells generate in parallel.
pub struct RegionGenerator {
    config: Arc<GeneratorConfig>,
    fields: NoiseFields,
    pipeline: Pipeline,
    biome_areas: AreaFactory,
    rock_areas: AreaFactory,
    regions: CellCache<Region>,
    partitions: CellCache<RegionPartition>,
    generated: AtomicUsize,
}

impl RegionGenerator {
    /// Validates the configuration and pipeline and builds the layer chains.
    pub fn new(config: GeneratorConfig, pipeline: Pipeline) -> Result<Self, ConfigError> {
        config.validate()?;
        pipeline.validate()?;

        let layers = &config.layers;
        let biome_areas = layers.factory("biome_blobs", &layers.biome_blobs, config.seed)?;
        let rock_areas = layers.factory("rocks", &layers.rocks, config.seed)?;
        let fields = config.noise_fields();

        let stages: Vec<&str> = pipeline.stage_ids().iter().map(|id| id.name()).collect();
        info!(
            seed = config.seed,
            cell_size = config.cell_size,
            points_per_cell = config.points_per_cell(),
            stages = ?stages,
            "region generator ready"
        );

        Ok(Self {
            config: Arc::new(config),
            fields,
            pipeline,
            biome_areas,
            rock_areas,
            regions: CellCache::new(),
            partitions: CellCache::new(),
            generated: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn fields(&self) -> &NoiseFields {
        &self.fields
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Cell containing block `(x, z)`.
    pub fn cell_of_block(&self, x: i32, z: i32) -> (i32, i32) {
        (x.div_euclid(self.config.cell_size), z.div_euclid(self.config.cell_size))
    }

    /// Grid point containing block `(x, z)`.
    pub fn grid_of_block(&self, x: i32, z: i32) -> (i32, i32) {
        (x.div_euclid(self.config.grid_width), z.div_euclid(self.config.grid_width))
    }

    /// The partition cell containing block `(x, z)`, generating it on first use.
    pub fn get_or_create_region(&self, x: i32, z: i32) -> Arc<RegionPartition> {
        let (cell_x, cell_z) = self.cell_of_block(x, z);
        self.partition(cell_x, cell_z)
    }

    /// Partition view of cell `(cell_x, cell_z)`, with rivers from the
    /// surrounding cells gathered in.
    pub fn partition(&self, cell_x: i32, cell_z: i32) -> Arc<RegionPartition> {
        self.partitions.get_or_init((cell_x, cell_z), || {
            let region = self.region(cell_x, cell_z);
            let (min_x, min_z) = region.min();
            let (max_x, max_z) = region.max();
            let min = Vec2::new(min_x as f32, min_z as f32);
            let max = Vec2::new(max_x as f32, max_z as f32);
            let margin = self.river_reach();

            let mut rivers = Vec::new();
            for dz in -1..=1 {
                for dx in -1..=1 {
                    let neighbor = self.region(cell_x + dx, cell_z + dz);
                    rivers.extend(
                        neighbor
                            .rivers()
                            .iter()
                            .filter(|edge| edge.may_touch(min, max, margin))
                            .cloned(),
                    );
                }
            }
            RegionPartition::new(region, rivers)
        })
    }

    /// The finished region of cell `(cell_x, cell_z)`, generating it on first use.
    pub fn region(&self, cell_x: i32, cell_z: i32) -> Arc<Region> {
        self.regions.get_or_init((cell_x, cell_z), || {
            let start = Instant::now();
            let region = self.run_pipeline(cell_x, cell_z, |_, _| {});
            self.generated.fetch_add(1, Ordering::Relaxed);
            debug!(
                cell_x,
                cell_z,
                rivers = region.rivers().len(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "generated region"
            );
            region
        })
    }

    /// Runs the pipeline on a fresh, uncached copy of a cell and calls
    /// `inspect` with the region after every stage.
    pub fn inspect_region<F>(&self, cell_x: i32, cell_z: i32, inspect: F) -> Region
    where
        F: FnMut(StageId, &Region),
    {
        self.run_pipeline(cell_x, cell_z, inspect)
    }

    /// Number of cells whose pipeline has run.
    pub fn generated_count(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    /// How far from a river center line its carving can reach, in grid units.
    pub fn river_reach(&self) -> f32 {
        self.config.rivers.width * 3.0
    }

    fn run_pipeline<F>(&self, cell_x: i32, cell_z: i32, inspect: F) -> Region
    where
        F: FnMut(StageId, &Region),
    {
        let mut region = Region::new(cell_x, cell_z, self.config.points_per_cell());
        let seed = cell_seed(self.config.seed, cell_x, cell_z);
        let mut ctx = RegionContext::new(
            &mut region,
            &self.fields,
            &self.config,
            &self.biome_areas,
            &self.rock_areas,
            seed,
        );
        self.pipeline.run_with_callbacks(&mut ctx, |_, _, _| {}, inspect);
        region
    }
}
