//! Region partitions: the per-cell point grids and their generation.
//!
//! The world is divided into square cells. Each cell owns a flat arena of
//! [`Point`]s that the pipeline stages fill in place, plus the river edges it
//! generated. [`RegionGenerator`] computes each cell at most once and serves
//! it as a [`RegionPartition`].

mod cache;
mod config;
mod context;
mod distance;
mod fields;
mod generator;
mod grid;
mod mountains;
mod partition;
mod point;

pub use cache::CellCache;
pub use config::TerrainConfig;
pub use context::RegionContext;
pub use distance::annotate_distances;
pub use fields::NoiseFields;
pub use generator::RegionGenerator;
pub use grid::{Region, ADJACENT, ORTHOGONAL};
pub use mountains::add_mountains;
pub use partition::RegionPartition;
pub use point::{Point, DISTANCE_UNKNOWN};
