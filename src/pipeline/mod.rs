//! Pipeline module for orchestrating region generation stages.
//!
//! Provides a trait-based architecture for modular stages that are composed
//! into the ordered pipeline every region runs through.

mod stage;

pub use stage::{
    AddMountainsStage, AddRiversAndLakesStage, AnnotateBiomeAltitudeStage, AnnotateClimateStage,
    AnnotateDistanceStage, ChooseBiomesStage, ChooseRocksStage, Pipeline, PipelineError, RegionStage, StageId,
};
