//! Noise generation for terrain synthesis.
//!
//! Surface fields use simdnoise simplex fBm over the world plane. Cave density
//! functions use seeded octave Perlin noise in three dimensions.

mod fractal;
mod perlin;

pub use fractal::{FractalNoiseConfig, sample_fractal_noise_2d, sample_ridged_noise_2d};
pub use perlin::{ImprovedNoise, NoiseParameters, OctaveNoise};
pub(crate) use perlin::lerp;
