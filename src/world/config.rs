//! Top-level generator configuration and its validation errors.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::BiomeConfig;
use crate::climate::ClimateConfig;
use crate::density::CaveConfig;
use crate::layer::{AreaFactory, LayerChainConfig, LayerChainError, DEFAULT_CAPACITY, DEFAULT_TILE_SIZE};
use crate::pipeline::PipelineError;
use crate::region::{NoiseFields, TerrainConfig};
use crate::river::RiverConfig;

/// Largest supported number of points per cell side. Distances are stored in a byte.
pub const MAX_POINTS_PER_SIDE: usize = 250;

/// Errors detected when a generator is constructed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),
    #[error("grid width must be positive, got {0}")]
    InvalidGridWidth(i32),
    #[error("cell size {cell_size} is not a multiple of grid width {grid_width}")]
    CellGridMismatch { cell_size: i32, grid_width: i32 },
    #[error("cell holds {0} points per side (max {max})", max = MAX_POINTS_PER_SIDE)]
    CellTooLarge(usize),
    #[error("world radius must be positive, got {0}")]
    InvalidWorldRadius(i32),
    #[error("layer chain '{0}': {1}")]
    LayerChain(&'static str, LayerChainError),
    #[error("terrain: {0}")]
    Terrain(String),
    #[error("climate: {0}")]
    Climate(String),
    #[error("rivers: {0}")]
    River(String),
    #[error("caves: {0}")]
    Cave(String),
    #[error("biomes: {0}")]
    Biome(String),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Layer chains and the tile cache settings of their areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub biome_blobs: LayerChainConfig,
    pub rocks: LayerChainConfig,
    pub ph: LayerChainConfig,
    pub drainage: LayerChainConfig,
    pub tile_size: usize,
    pub capacity: usize,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            biome_blobs: LayerChainConfig::biome_blobs(),
            rocks: LayerChainConfig::rocks(),
            ph: LayerChainConfig::ordinal(0x0F4, 4),
            drainage: LayerChainConfig::ordinal(0xD4A1, 5),
            tile_size: DEFAULT_TILE_SIZE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl LayerConfig {
    /// Builds one named chain into an area factory.
    pub fn factory(&self, name: &'static str, chain: &LayerChainConfig, seed: u64) -> Result<AreaFactory, ConfigError> {
        let layer = chain.build(seed).map_err(|e| ConfigError::LayerChain(name, e))?;
        Ok(AreaFactory::new(layer, self.tile_size, self.capacity))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, chain) in self.chains() {
            chain.validate().map_err(|e| ConfigError::LayerChain(name, e))?;
        }
        Ok(())
    }

    fn chains(&self) -> [(&'static str, &LayerChainConfig); 4] {
        [
            ("biome_blobs", &self.biome_blobs),
            ("rocks", &self.rocks),
            ("ph", &self.ph),
            ("drainage", &self.drainage),
        ]
    }
}

/// Everything a [`WorldGenerator`](super::WorldGenerator) needs besides its
/// pipeline.
///
/// Coordinates:
/// - block coordinates are what queries take;
/// - one grid point covers `grid_width` blocks per side;
/// - one region cell covers `cell_size` blocks per side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub grid_width: i32,
    pub cell_size: i32,
    /// Blocks from the origin beyond which the world is empty ocean.
    pub world_radius: Option<i32>,
    pub sea_level: i32,
    /// Blocks per land height unit.
    pub land_step: i32,
    /// Blocks per ocean depth unit.
    pub ocean_step: i32,
    pub terrain: TerrainConfig,
    pub biomes: BiomeConfig,
    pub climate: ClimateConfig,
    pub rivers: RiverConfig,
    pub caves: CaveConfig,
    pub layers: LayerConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grid_width: 8,
            cell_size: 512,
            world_radius: None,
            sea_level: 63,
            land_step: 2,
            ocean_step: 2,
            terrain: TerrainConfig::default(),
            biomes: BiomeConfig::default(),
            climate: ClimateConfig::default(),
            rivers: RiverConfig::default(),
            caves: CaveConfig::default(),
            layers: LayerConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults with every noise field derived from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            terrain: TerrainConfig::with_seed(seed),
            climate: ClimateConfig::with_seed(seed),
            caves: CaveConfig::with_seed(seed),
            ..Default::default()
        }
    }

    /// These settings under a different world seed, with every noise field
    /// seeded the way [`with_seed`](Self::with_seed) would.
    pub fn reseeded(mut self, seed: u64) -> Self {
        let fresh = Self::with_seed(seed);
        self.seed = seed;
        let terrain = &mut self.terrain;
        terrain.continent.seed = fresh.terrain.continent.seed;
        terrain.volcanic.seed = fresh.terrain.volcanic.seed;
        terrain.uplift.seed = fresh.terrain.uplift.seed;
        terrain.mountains.seed = fresh.terrain.mountains.seed;
        self.climate.temperature_noise.seed = fresh.climate.temperature_noise.seed;
        self.climate.rainfall_noise.seed = fresh.climate.rainfall_noise.seed;
        self.caves.seed = fresh.caves.seed;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Points per region side.
    pub fn points_per_cell(&self) -> usize {
        (self.cell_size / self.grid_width.max(1)).max(1) as usize
    }

    /// World bound in grid units.
    pub fn grid_radius(&self) -> Option<f32> {
        self.world_radius.map(|r| r as f32 / self.grid_width.max(1) as f32)
    }

    pub fn noise_fields(&self) -> NoiseFields {
        NoiseFields::new(self.terrain.clone(), self.grid_radius())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width <= 0 {
            return Err(ConfigError::InvalidGridWidth(self.grid_width));
        }
        if self.cell_size <= 0 {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.cell_size % self.grid_width != 0 {
            return Err(ConfigError::CellGridMismatch {
                cell_size: self.cell_size,
                grid_width: self.grid_width,
            });
        }
        if self.points_per_cell() > MAX_POINTS_PER_SIDE {
            return Err(ConfigError::CellTooLarge(self.points_per_cell()));
        }
        if let Some(radius) = self.world_radius {
            if radius <= 0 {
                return Err(ConfigError::InvalidWorldRadius(radius));
            }
        }
        if self.land_step <= 0 || self.ocean_step <= 0 {
            return Err(ConfigError::Terrain("height steps must be positive".into()));
        }
        self.terrain.validate().map_err(ConfigError::Terrain)?;
        self.biomes.validate().map_err(ConfigError::Biome)?;
        self.climate.validate().map_err(ConfigError::Climate)?;
        self.rivers.validate().map_err(ConfigError::River)?;
        self.caves.validate().map_err(ConfigError::Cave)?;
        self.layers.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.points_per_cell(), 64);
    }

    #[test]
    fn test_with_seed_reseeds_noise() {
        let a = GeneratorConfig::with_seed(1);
        let b = GeneratorConfig::with_seed(2);
        assert_ne!(a.terrain, b.terrain);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_reseeded_keeps_shape_settings() {
        let config = GeneratorConfig {
            cell_size: 256,
            sea_level: 70,
            ..GeneratorConfig::with_seed(1)
        }
        .reseeded(9);
        let fresh = GeneratorConfig::with_seed(9);
        assert_eq!(config.cell_size, 256);
        assert_eq!(config.sea_level, 70);
        assert_eq!(config.terrain, fresh.terrain);
        assert_eq!(config.climate, fresh.climate);
        assert_eq!(config.caves, fresh.caves);
    }

    #[test]
    fn test_bad_cell_sizes_are_rejected() {
        let negative = GeneratorConfig {
            cell_size: -512,
            ..Default::default()
        };
        assert!(matches!(negative.validate(), Err(ConfigError::InvalidCellSize(-512))));

        let ragged = GeneratorConfig {
            cell_size: 500,
            ..Default::default()
        };
        assert!(matches!(ragged.validate(), Err(ConfigError::CellGridMismatch { .. })));

        let huge = GeneratorConfig {
            cell_size: 8 * 300,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::CellTooLarge(300))));
    }

    #[test]
    fn test_broken_layer_chain_is_rejected() {
        let mut config = GeneratorConfig::default();
        config.layers.rocks.ops.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LayerChain("rocks", LayerChainError::Empty))
        ));
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            seed = 7
            cell_size = 256
            world_radius = 4096

            [rivers]
            max_rivers = 3
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.seed, 7);
        assert_eq!(config.points_per_cell(), 32);
        assert_eq!(config.world_radius, Some(4096));
        assert_eq!(config.rivers.max_rivers, 3);
        assert_eq!(config.rivers.vertex_spacing, RiverConfig::default().vertex_spacing);
    }

    #[test]
    fn test_toml_errors_are_reported() {
        assert!(matches!(
            GeneratorConfig::from_toml_str("cell_size = \"big\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GeneratorConfig::from_toml_str("grid_width = 0"),
            Err(ConfigError::InvalidGridWidth(0))
        ));
    }
}
