//! Cave density functions.
//!
//! A density function maps a block position to a value in `[min, max]`;
//! negative values are open air. Every function here is a pure function of
//! the position and its configuration, so it can be evaluated from any thread
//! in any order.

mod carver;
mod config;
mod modulator;
mod spaghetti;

pub use carver::CaveCarver;
pub use config::CaveConfig;
pub use modulator::{map_range, y_gradient, Modulator, RarityMapper, ScaledNoise};
pub use spaghetti::{Spaghetti2D, Spaghetti3D};

/// Block position a density function is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DensityContext {
    pub block_x: i32,
    pub block_y: i32,
    pub block_z: i32,
}

impl DensityContext {
    pub fn new(block_x: i32, block_y: i32, block_z: i32) -> Self {
        Self { block_x, block_y, block_z }
    }

    pub fn position(&self) -> (f64, f64, f64) {
        (self.block_x as f64, self.block_y as f64, self.block_z as f64)
    }
}

/// A bounded scalar field over block positions.
pub trait DensityFunction: Send + Sync {
    /// Density at `ctx`, always within `[self.min(), self.max()]`.
    fn compute(&self, ctx: &DensityContext) -> f64;

    fn min(&self) -> f64;

    fn max(&self) -> f64;
}
