//! Deterministic region-based terrain generation.
//!
//! The world is split into square partition cells of grid points. Each cell is
//! generated once by an ordered pipeline of stages (rocks, biomes, mountains,
//! distances, rivers and lakes, climate, altitude) fed by layer chains and
//! noise fields, then served read-only to any number of threads. Cave density
//! is an independent 3D path built from spaghetti noise functions.
//!
//! [`WorldGenerator`] is the entry point for block-coordinate queries.

pub mod biomes;
pub mod climate;
pub mod density;
pub mod layer;
pub mod noise;
pub mod pipeline;
pub mod random;
pub mod region;
pub mod river;
pub mod rocks;
pub mod world;

pub use biomes::BiomeId;
pub use density::{CaveCarver, CaveConfig, DensityContext, DensityFunction};
pub use layer::{Drainage, PhLevel};
pub use noise::FractalNoiseConfig;
pub use pipeline::{Pipeline, PipelineError, RegionStage, StageId};
pub use region::{Point, Region, RegionGenerator, RegionPartition};
pub use river::{MidpointFractal, RiverEdge};
pub use rocks::{Rock, RockCategory};
pub use world::{ConfigError, GeneratorConfig, WorldGenerator};
