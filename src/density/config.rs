//! Cave noise configuration.

use serde::{Deserialize, Serialize};

use crate::noise::NoiseParameters;

/// Noise layouts and vertical range of the spaghetti caves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub seed: u64,
    /// Lowest carvable block.
    pub min_y: i32,
    /// Highest carvable block.
    pub max_y: i32,

    pub spaghetti_2d: NoiseParameters,
    pub spaghetti_2d_modulator: NoiseParameters,
    pub spaghetti_2d_elevation: NoiseParameters,
    pub spaghetti_2d_thickness: NoiseParameters,

    pub spaghetti_3d_1: NoiseParameters,
    pub spaghetti_3d_2: NoiseParameters,
    pub spaghetti_3d_rarity: NoiseParameters,
    pub spaghetti_3d_thickness: NoiseParameters,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_y: -64,
            max_y: 320,
            spaghetti_2d: NoiseParameters::new(-7, &[1.0]),
            spaghetti_2d_modulator: NoiseParameters::new(-11, &[1.0]),
            spaghetti_2d_elevation: NoiseParameters::new(-8, &[1.0]),
            spaghetti_2d_thickness: NoiseParameters::new(-11, &[1.0]),
            spaghetti_3d_1: NoiseParameters::new(-7, &[1.0]),
            spaghetti_3d_2: NoiseParameters::new(-7, &[1.0]),
            spaghetti_3d_rarity: NoiseParameters::new(-11, &[1.0]),
            spaghetti_3d_thickness: NoiseParameters::new(-8, &[1.0]),
        }
    }
}

impl CaveConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_y >= self.max_y {
            return Err(format!("min_y {} must be below max_y {}", self.min_y, self.max_y));
        }
        let noises = [
            ("spaghetti_2d", &self.spaghetti_2d),
            ("spaghetti_2d_modulator", &self.spaghetti_2d_modulator),
            ("spaghetti_2d_elevation", &self.spaghetti_2d_elevation),
            ("spaghetti_2d_thickness", &self.spaghetti_2d_thickness),
            ("spaghetti_3d_1", &self.spaghetti_3d_1),
            ("spaghetti_3d_2", &self.spaghetti_3d_2),
            ("spaghetti_3d_rarity", &self.spaghetti_3d_rarity),
            ("spaghetti_3d_thickness", &self.spaghetti_3d_thickness),
        ];
        for (name, parameters) in noises {
            if !parameters.is_valid() {
                return Err(format!("noise '{}' needs at least one finite, non-zero amplitude", name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert!(CaveConfig::default().validate().is_ok());
        assert_eq!(CaveConfig::with_seed(9).seed, 9);
    }

    #[test]
    fn test_silent_noise_is_rejected() {
        let cfg = CaveConfig {
            spaghetti_3d_2: NoiseParameters::new(-7, &[0.0]),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
