//! Multi-octave fractal Brownian motion (fBm) noise over the world plane.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves.
    pub octaves: u8,
    /// Base frequency, in cycles per grid unit.
    pub frequency: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Random seed for reproducible generation.
    pub seed: i32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            frequency: 1.0 / 64.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 42,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Very low frequency field shaping continents and ocean basins.
    pub fn continents(seed: i32) -> Self {
        Self {
            octaves: 5,
            frequency: 1.0 / 160.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed,
        }
    }

    /// Medium frequency field for features such as mountain ranges.
    pub fn ranges(seed: i32) -> Self {
        Self {
            octaves: 4,
            frequency: 1.0 / 48.0,
            lacunarity: 2.1,
            persistence: 0.5,
            seed,
        }
    }

    /// Smooth, two octave perturbation used on top of periodic climate bands.
    pub fn climate(seed: i32) -> Self {
        Self {
            octaves: 2,
            frequency: 1.0 / 96.0,
            lacunarity: 2.0,
            persistence: 0.5,
            seed,
        }
    }

    /// Returns a copy of this configuration with a different seed.
    pub fn reseeded(&self, seed: i32) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.octaves > 0 && self.frequency.is_finite() && self.frequency > 0.0 && self.persistence > 0.0
    }
}

/// Samples fractal noise at a point of the world plane.
///
/// Each octave is a single 2D simplex sample with its own seed, so the result
/// depends only on `pos` and `config`.
///
/// # Returns
/// A value in approximately [-1, 1] (normalized by the amplitude sum)
pub fn sample_fractal_noise_2d(pos: Vec2, config: &FractalNoiseConfig) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = config.frequency;
    let mut max_amplitude = 0.0f32;

    for octave in 0..config.octaves {
        let octave_seed = config.seed.wrapping_add(octave as i32 * 31337);
        let p = pos * frequency;

        let noise_value = NoiseBuilder::fbm_2d_offset(p.x, 1, p.y, 1)
            .with_seed(octave_seed)
            .with_freq(1.0)
            .with_octaves(1)
            .generate()
            .0[0];

        total += noise_value * amplitude;
        max_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    if max_amplitude > 0.0 {
        total / max_amplitude
    } else {
        0.0
    }
}

/// Ridged variant in [0, 1]: peaks where the underlying noise crosses zero.
pub fn sample_ridged_noise_2d(pos: Vec2, config: &FractalNoiseConfig) -> f32 {
    (1.0 - sample_fractal_noise_2d(pos, config).abs()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 4);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
        assert!(config.is_valid());
    }

    #[test]
    fn test_noise_reproducibility() {
        let config = FractalNoiseConfig::continents(12345);
        let pos = Vec2::new(1520.5, -77.5);

        let result1 = sample_fractal_noise_2d(pos, &config);
        let result2 = sample_fractal_noise_2d(pos, &config);

        assert_eq!(result1, result2, "Same seed and position should produce same result");
    }

    #[test]
    fn test_noise_range() {
        let config = FractalNoiseConfig::ranges(7);
        for i in 0..200 {
            let pos = Vec2::new(i as f32 * 13.7 - 900.0, i as f32 * -7.3 + 40.0);
            let value = sample_fractal_noise_2d(pos, &config);
            assert!(
                (-1.5..=1.5).contains(&value),
                "Noise value {} at {:?} out of expected range",
                value,
                pos
            );
            let ridged = sample_ridged_noise_2d(pos, &config);
            assert!((0.0..=1.0).contains(&ridged));
        }
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let pos = Vec2::new(50.5, 30.25);
        let mut differing = 0;
        for seed in 0..8 {
            let a = sample_fractal_noise_2d(pos, &FractalNoiseConfig::with_seed(seed));
            let b = sample_fractal_noise_2d(pos, &FractalNoiseConfig::with_seed(seed + 100));
            if a != b {
                differing += 1;
            }
        }
        assert!(differing > 0, "Different seeds should produce different results");
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let config = FractalNoiseConfig {
            octaves: 0,
            ..Default::default()
        };
        assert_eq!(sample_fractal_noise_2d(Vec2::new(3.0, 4.0), &config), 0.0);
        assert!(!config.is_valid());
    }
}
