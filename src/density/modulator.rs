//! Building blocks shared by the spaghetti density functions.

use crate::noise::{lerp, NoiseParameters, OctaveNoise};
use crate::random::derive_seed;

/// Quantizes a rarity noise value into a small set of scale factors.
///
/// Tunnels and caves use different bands. Larger factors stretch the
/// sampled noise, giving sparser and wider passages in that region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RarityMapper {
    /// Bands used by 3D tunnels.
    Tunnels,
    /// Bands used by 2D caves.
    Caves,
}

impl RarityMapper {
    /// Scale factor for `rarity`. Non-finite input maps to 1.
    pub fn scale(self, rarity: f64) -> f64 {
        if !rarity.is_finite() {
            return 1.0;
        }
        match self {
            Self::Tunnels => {
                if rarity < -0.5 {
                    0.75
                } else if rarity < 0.0 {
                    1.0
                } else if rarity < 0.5 {
                    1.5
                } else {
                    2.0
                }
            }
            Self::Caves => {
                if rarity < -0.75 {
                    0.5
                } else if rarity < -0.5 {
                    0.75
                } else if rarity < 0.5 {
                    1.0
                } else if rarity < 0.75 {
                    2.0
                } else {
                    3.0
                }
            }
        }
    }
}

/// Octave noise with separate horizontal and vertical input scales.
#[derive(Debug, Clone)]
pub struct ScaledNoise {
    noise: OctaveNoise,
    xz_scale: f64,
    y_scale: f64,
}

impl ScaledNoise {
    pub fn new(seed: u64, salt: u64, parameters: &NoiseParameters, xz_scale: f64, y_scale: f64) -> Self {
        Self {
            noise: OctaveNoise::new(derive_seed(seed, salt), parameters),
            xz_scale,
            y_scale,
        }
    }

    /// Normalized sample in [-1, 1].
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.sample(x * self.xz_scale, y * self.y_scale, z * self.xz_scale)
    }

    /// `rarity * |noise(p / rarity)|`, the rarity-stretched absolute surface.
    pub fn weird_scaled(&self, x: f64, y: f64, z: f64, rarity: f64) -> f64 {
        rarity * self.noise.sample(x / rarity, y / rarity, z / rarity).abs()
    }
}

/// Scaled noise remapped from [-1, 1] onto `[low, high]`.
#[derive(Debug, Clone)]
pub struct Modulator {
    source: ScaledNoise,
    low: f64,
    high: f64,
}

impl Modulator {
    pub fn new(source: ScaledNoise, low: f64, high: f64) -> Self {
        Self { source, low, high }
    }

    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        map_range(self.source.sample(x, y, z), self.low, self.high)
    }
}

/// Maps `value` in [-1, 1] linearly onto `[low, high]`.
pub fn map_range(value: f64, low: f64, high: f64) -> f64 {
    lerp((value + 1.0) * 0.5, low, high)
}

/// Linear ramp from `from_value` at `from_y` to `to_value` at `to_y`,
/// held constant outside that range.
pub fn y_gradient(y: f64, from_y: f64, to_y: f64, from_value: f64, to_value: f64) -> f64 {
    let t = ((y - from_y) / (to_y - from_y)).clamp(0.0, 1.0);
    lerp(t, from_value, to_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tunnel_bands() {
        let mapper = RarityMapper::Tunnels;
        assert_eq!(mapper.scale(-0.6), 0.75);
        assert_eq!(mapper.scale(-0.3), 1.0);
        assert_eq!(mapper.scale(0.0), 1.5);
        assert_eq!(mapper.scale(0.6), 2.0);
    }

    #[test]
    fn cave_bands() {
        let mapper = RarityMapper::Caves;
        assert_eq!(mapper.scale(-0.8), 0.5);
        assert_eq!(mapper.scale(-0.6), 0.75);
        assert_eq!(mapper.scale(0.0), 1.0);
        assert_eq!(mapper.scale(0.6), 2.0);
        assert_eq!(mapper.scale(0.8), 3.0);
    }

    #[test]
    fn non_finite_rarity_falls_back() {
        for mapper in [RarityMapper::Tunnels, RarityMapper::Caves] {
            assert_eq!(mapper.scale(f64::NAN), 1.0);
            assert_eq!(mapper.scale(f64::INFINITY), 1.0);
        }
    }

    #[test]
    fn gradient_is_clamped() {
        assert_eq!(y_gradient(-100.0, -64.0, 320.0, 8.0, -40.0), 8.0);
        assert_eq!(y_gradient(500.0, -64.0, 320.0, 8.0, -40.0), -40.0);
        assert!((y_gradient(128.0, -64.0, 320.0, 8.0, -40.0) + 16.0).abs() < 1e-9);
    }

    #[test]
    fn map_range_endpoints() {
        assert_eq!(map_range(-1.0, -0.6, -1.3), -0.6);
        assert!((map_range(1.0, -0.6, -1.3) + 1.3).abs() < 1e-12);
        assert_eq!(map_range(0.0, -8.0, 8.0), 0.0);
    }
}
