//! Spaghetti cave density functions.

use super::modulator::{y_gradient, Modulator, RarityMapper, ScaledNoise};
use super::{CaveConfig, DensityContext, DensityFunction};

/// Horizontal cave sheets with flat floors and ceilings.
///
/// `left` is the cubed vertical distance from a wandering target elevation,
/// `right` the rarity-scaled noise surface minus a thickness margin. The
/// density is `clamp(max(left, right), -1, 1)`; negative values are open.
#[derive(Debug, Clone)]
pub struct Spaghetti2D {
    noise: ScaledNoise,
    rarity: ScaledNoise,
    thickness: Modulator,
    elevation: Modulator,
    min_y: f64,
    max_y: f64,
}

impl Spaghetti2D {
    pub fn new(cfg: &CaveConfig) -> Self {
        let seed = cfg.seed;
        Self {
            noise: ScaledNoise::new(seed, 0x2D01, &cfg.spaghetti_2d, 1.0, 1.0),
            rarity: ScaledNoise::new(seed, 0x2D02, &cfg.spaghetti_2d_modulator, 2.0, 1.0),
            thickness: Modulator::new(
                ScaledNoise::new(seed, 0x2D03, &cfg.spaghetti_2d_thickness, 2.0, 1.0),
                -0.6,
                -1.3,
            ),
            elevation: Modulator::new(
                ScaledNoise::new(seed, 0x2D04, &cfg.spaghetti_2d_elevation, 1.0, 0.0),
                -8.0,
                8.0,
            ),
            min_y: cfg.min_y as f64,
            max_y: cfg.max_y as f64,
        }
    }
}

impl DensityFunction for Spaghetti2D {
    fn compute(&self, ctx: &DensityContext) -> f64 {
        let (x, y, z) = ctx.position();
        let rarity = RarityMapper::Caves.scale(self.rarity.sample(x, y, z));
        let weird = self.noise.weird_scaled(x, y, z, rarity);
        let thickness = self.thickness.sample(x, y, z);

        let target = self.elevation.sample(x, y, z) + y_gradient(y, self.min_y, self.max_y, 8.0, -40.0);
        let left = (target.abs() + thickness).powi(3);
        let right = weird + 0.083 * thickness;

        left.max(right).clamp(self.min(), self.max())
    }

    fn min(&self) -> f64 {
        -1.0
    }

    fn max(&self) -> f64 {
        1.0
    }
}

/// Worm-like tunnels where two independent noise surfaces are both near zero.
#[derive(Debug, Clone)]
pub struct Spaghetti3D {
    first: ScaledNoise,
    second: ScaledNoise,
    rarity: ScaledNoise,
    thickness: Modulator,
}

impl Spaghetti3D {
    pub fn new(cfg: &CaveConfig) -> Self {
        let seed = cfg.seed;
        Self {
            first: ScaledNoise::new(seed, 0x3D01, &cfg.spaghetti_3d_1, 1.0, 1.0),
            second: ScaledNoise::new(seed, 0x3D02, &cfg.spaghetti_3d_2, 1.0, 1.0),
            rarity: ScaledNoise::new(seed, 0x3D03, &cfg.spaghetti_3d_rarity, 2.0, 1.0),
            thickness: Modulator::new(
                ScaledNoise::new(seed, 0x3D04, &cfg.spaghetti_3d_thickness, 1.0, 1.0),
                -0.065,
                -0.088,
            ),
        }
    }
}

impl DensityFunction for Spaghetti3D {
    fn compute(&self, ctx: &DensityContext) -> f64 {
        let (x, y, z) = ctx.position();
        let rarity = RarityMapper::Tunnels.scale(self.rarity.sample(x, y, z));
        let first = self.first.weird_scaled(x, y, z, rarity);
        let second = self.second.weird_scaled(x, y, z, rarity);
        let thickness = self.thickness.sample(x, y, z);

        (first.max(second) + thickness).clamp(self.min(), self.max())
    }

    fn min(&self) -> f64 {
        -1.0
    }

    fn max(&self) -> f64 {
        1.0
    }
}
