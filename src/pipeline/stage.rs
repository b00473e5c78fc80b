//! Region stage trait and pipeline orchestration.

use thiserror::Error;
use tracing::trace;

use crate::biomes::{annotate_biome_altitude, choose_biomes};
use crate::climate::annotate_climate;
use crate::region::{add_mountains, annotate_distances, Region, RegionContext};
use crate::river::add_rivers_and_lakes;
use crate::rocks::choose_rocks;

/// Unique identifier for region stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Land mask, base heights, rock category and rock.
    ChooseRocks,
    /// Ocean tiers, shore and lowland biomes.
    ChooseBiomes,
    /// Ridge mountains and their height.
    AddMountains,
    /// Distance to ocean and to the cell border.
    AnnotateDistance,
    /// Lakes and the drainage network.
    AddRiversAndLakes,
    /// Temperature and rainfall.
    AnnotateClimate,
    /// Altitude bands and the final biome variants.
    AnnotateBiomeAltitude,
    /// A stage defined outside this crate.
    Custom(&'static str),
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::ChooseRocks => "choose_rocks",
            StageId::ChooseBiomes => "choose_biomes",
            StageId::AddMountains => "add_mountains",
            StageId::AnnotateDistance => "annotate_distance",
            StageId::AddRiversAndLakes => "add_rivers_and_lakes",
            StageId::AnnotateClimate => "annotate_climate",
            StageId::AnnotateBiomeAltitude => "annotate_biome_altitude",
            StageId::Custom(name) => *name,
        }
    }
}

/// Errors in the shape of a pipeline. Detected once, before any region is generated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Missing dependency: stage '{0}' requires '{1}' to run earlier")]
    MissingDependency(String, String),
    #[error("Stage '{0}' appears more than once")]
    DuplicateStage(String),
    #[error("Pipeline has no stages")]
    Empty,
}

/// One step of region generation.
///
/// A stage receives the region in the state left by the stages before it and
/// mutates the points in place. Stages cannot fail; configuration problems
/// are rejected when the generator is built.
///
/// Stages run inside the region cache initializer and must stay on the calling
/// thread. Parallelism belongs at the cell level, see
/// [`WorldGenerator::prefetch`](crate::WorldGenerator::prefetch).
pub trait RegionStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str {
        self.id().name()
    }

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage on one region.
    fn execute(&self, ctx: &mut RegionContext<'_>);
}

/// Ordered list of region stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn RegionStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// The seven built-in stages in dependency order.
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(ChooseRocksStage)
            .add_stage(ChooseBiomesStage)
            .add_stage(AddMountainsStage)
            .add_stage(AnnotateDistanceStage)
            .add_stage(AddRiversAndLakesStage)
            .add_stage(AnnotateClimateStage)
            .add_stage(AnnotateBiomeAltitudeStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: RegionStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|stage| stage.id()).collect()
    }

    /// Checks that the pipeline is non-empty, has no repeated stage and runs
    /// every dependency before the stage that needs it.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.stages.is_empty() {
            return Err(PipelineError::Empty);
        }
        let mut completed: Vec<StageId> = Vec::new();
        for stage in &self.stages {
            if completed.contains(&stage.id()) {
                return Err(PipelineError::DuplicateStage(stage.name().to_string()));
            }
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }
            completed.push(stage.id());
        }
        Ok(())
    }

    /// Executes all stages in order on one region.
    pub fn run(&self, ctx: &mut RegionContext<'_>) {
        self.run_with_callbacks(ctx, |_, _, _| {}, |_, _| {});
    }

    /// Executes all stages with callbacks.
    ///
    /// # Arguments
    /// * `ctx` - The region being generated
    /// * `on_stage_start` - Called with the stage id, its index and the stage count
    /// * `on_stage_complete` - Called with the stage id and the region after the stage
    pub fn run_with_callbacks<F1, F2>(&self, ctx: &mut RegionContext<'_>, mut on_stage_start: F1, mut on_stage_complete: F2)
    where
        F1: FnMut(StageId, usize, usize),
        F2: FnMut(StageId, &Region),
    {
        let total = self.stages.len();
        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.id(), i, total);
            trace!(stage = stage.name(), cell = ?ctx.region.cell(), "running stage");
            stage.execute(ctx);
            on_stage_complete(stage.id(), &*ctx.region);
        }
    }
}

/// Land mask, heights and rocks from the world noise fields.
pub struct ChooseRocksStage;

impl RegionStage for ChooseRocksStage {
    fn id(&self) -> StageId {
        StageId::ChooseRocks
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        choose_rocks(ctx);
    }
}

/// Base biomes from depth, coast and rock category.
pub struct ChooseBiomesStage;

impl RegionStage for ChooseBiomesStage {
    fn id(&self) -> StageId {
        StageId::ChooseBiomes
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::ChooseRocks]
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        choose_biomes(ctx);
    }
}

/// Ridge mountains on land.
pub struct AddMountainsStage;

impl RegionStage for AddMountainsStage {
    fn id(&self) -> StageId {
        StageId::AddMountains
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::ChooseRocks, StageId::ChooseBiomes]
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        add_mountains(ctx);
    }
}

/// Ocean and cell-edge distances.
pub struct AnnotateDistanceStage;

impl RegionStage for AnnotateDistanceStage {
    fn id(&self) -> StageId {
        StageId::AnnotateDistance
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::ChooseRocks]
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        annotate_distances(ctx);
    }
}

/// Lakes and river edges.
pub struct AddRiversAndLakesStage;

impl RegionStage for AddRiversAndLakesStage {
    fn id(&self) -> StageId {
        StageId::AddRiversAndLakes
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::AnnotateDistance, StageId::AddMountains]
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        add_rivers_and_lakes(ctx);
    }
}

/// Temperature and rainfall.
pub struct AnnotateClimateStage;

impl RegionStage for AnnotateClimateStage {
    fn id(&self) -> StageId {
        StageId::AnnotateClimate
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::AnnotateDistance, StageId::AddMountains]
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        annotate_climate(ctx);
    }
}

/// Final biome variants by altitude and climate.
pub struct AnnotateBiomeAltitudeStage;

impl RegionStage for AnnotateBiomeAltitudeStage {
    fn id(&self) -> StageId {
        StageId::AnnotateBiomeAltitude
    }

    fn dependencies(&self) -> &[StageId] {
        &[
            StageId::ChooseBiomes,
            StageId::AddMountains,
            StageId::AddRiversAndLakes,
            StageId::AnnotateClimate,
        ]
    }

    fn execute(&self, ctx: &mut RegionContext<'_>) {
        annotate_biome_altitude(ctx);
    }
}
