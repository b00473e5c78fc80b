//! Layer chains described as configuration data.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::{derive_seed, CoordRandom};

use super::{BlendLayer, BlendMode, InitLayer, Layer, SmoothLayer, ZoomLayer};

/// One node in a layer chain, in order from the root generator outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LayerOp {
    /// Generator: uniform choice among `values`.
    Init { values: Vec<i32> },
    Zoom,
    FuzzyZoom,
    Smooth,
    Blend {
        mode: BlendMode,
        threshold: i32,
        chance: u32,
        min: i32,
        max: i32,
    },
}

/// Errors detected while validating a chain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerChainError {
    #[error("layer chain is empty")]
    Empty,
    #[error("layer chain must start with an init layer")]
    MissingInit,
    #[error("init layer at position {0} must be the first op")]
    MisplacedInit(usize),
    #[error("init layer has no values")]
    NoInitValues,
    #[error("blend layer at position {0}: {1}")]
    InvalidBlend(usize, String),
}

/// An ordered list of [`LayerOp`]s plus a salt that separates this chain's
/// seeds from every other chain built from the same world seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerChainConfig {
    pub salt: u64,
    pub ops: Vec<LayerOp>,
}

impl LayerChainConfig {
    /// Uniform random blobs over `0..range`, `zooms` times enlarged.
    pub fn uniform(salt: u64, range: i32, zooms: usize) -> Self {
        let mut ops = vec![LayerOp::Init { values: (0..range.max(1)).collect() }, LayerOp::FuzzyZoom];
        for i in 1..zooms {
            ops.push(LayerOp::Zoom);
            if i % 2 == 1 {
                ops.push(LayerOp::Smooth);
            }
        }
        Self { salt, ops }
    }

    /// Biome blob selector; blobs span roughly sixteen points.
    pub fn biome_blobs() -> Self {
        Self::uniform(0xB10B, 1 << 12, 4)
    }

    /// Rock variant selector; larger than biome blobs.
    pub fn rocks() -> Self {
        Self::uniform(0x50C4, 1 << 12, 5)
    }

    /// An ordinal field over `0..=max` blended into gradients.
    pub fn ordinal(salt: u64, max: i32) -> Self {
        let mix = LayerOp::Blend {
            mode: BlendMode::Mix,
            threshold: 1,
            chance: 3,
            min: 0,
            max,
        };
        Self {
            salt,
            ops: vec![
                LayerOp::Init { values: (0..=max).collect() },
                LayerOp::FuzzyZoom,
                mix.clone(),
                LayerOp::Zoom,
                mix.clone(),
                LayerOp::Zoom,
                LayerOp::Smooth,
                mix,
                LayerOp::Zoom,
                LayerOp::Zoom,
                LayerOp::Smooth,
            ],
        }
    }

    /// Number of resolution doublings in the chain.
    pub fn zoom_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, LayerOp::Zoom | LayerOp::FuzzyZoom))
            .count()
    }

    pub fn validate(&self) -> Result<(), LayerChainError> {
        let first = self.ops.first().ok_or(LayerChainError::Empty)?;
        match first {
            LayerOp::Init { values } if values.is_empty() => return Err(LayerChainError::NoInitValues),
            LayerOp::Init { .. } => {}
            _ => return Err(LayerChainError::MissingInit),
        }
        for (index, op) in self.ops.iter().enumerate().skip(1) {
            match op {
                LayerOp::Init { .. } => return Err(LayerChainError::MisplacedInit(index)),
                LayerOp::Blend { chance, min, max, .. } => {
                    if *chance == 0 {
                        return Err(LayerChainError::InvalidBlend(index, "chance must be at least 1".into()));
                    }
                    if min > max {
                        return Err(LayerChainError::InvalidBlend(index, format!("min {} exceeds max {}", min, max)));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validates and instantiates the chain for `world_seed`.
    ///
    /// Each op gets its own base seed drawn from a ChaCha stream keyed by the
    /// world seed and this chain's salt.
    pub fn build(&self, world_seed: u64) -> Result<Arc<dyn Layer>, LayerChainError> {
        self.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(derive_seed(world_seed, self.salt));
        let mut next_seed = || CoordRandom::layer_seed(world_seed as i64, rng.gen::<i64>());

        let mut layer: Option<Arc<dyn Layer>> = None;
        for op in &self.ops {
            let seed = next_seed();
            layer = Some(match (op, layer.take()) {
                (LayerOp::Init { values }, None) => Arc::new(InitLayer::new(seed, values.clone())),
                (LayerOp::Zoom, Some(parent)) => Arc::new(ZoomLayer::new(parent, seed)),
                (LayerOp::FuzzyZoom, Some(parent)) => Arc::new(ZoomLayer::fuzzy(parent, seed)),
                (LayerOp::Smooth, Some(parent)) => Arc::new(SmoothLayer::new(parent)),
                (LayerOp::Blend { mode, threshold, chance, min, max }, Some(parent)) => {
                    Arc::new(BlendLayer::new(parent, seed, *mode, *threshold, *chance, *min, *max))
                }
                (LayerOp::Init { .. }, Some(_)) => return Err(LayerChainError::MisplacedInit(0)),
                (_, None) => return Err(LayerChainError::MissingInit),
            });
        }
        layer.ok_or(LayerChainError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for chain in [
            LayerChainConfig::biome_blobs(),
            LayerChainConfig::rocks(),
            LayerChainConfig::ordinal(1, 4),
        ] {
            assert!(chain.validate().is_ok(), "preset invalid: {:?}", chain);
        }
        assert_eq!(LayerChainConfig::rocks().zoom_count(), 5);
    }

    #[test]
    fn rejects_malformed_chains() {
        let empty = LayerChainConfig { salt: 0, ops: vec![] };
        assert_eq!(empty.validate(), Err(LayerChainError::Empty));

        let headless = LayerChainConfig { salt: 0, ops: vec![LayerOp::Zoom] };
        assert_eq!(headless.validate(), Err(LayerChainError::MissingInit));

        let twice = LayerChainConfig {
            salt: 0,
            ops: vec![LayerOp::Init { values: vec![1] }, LayerOp::Zoom, LayerOp::Init { values: vec![2] }],
        };
        assert_eq!(twice.validate(), Err(LayerChainError::MisplacedInit(2)));

        let no_values = LayerChainConfig { salt: 0, ops: vec![LayerOp::Init { values: vec![] }] };
        assert_eq!(no_values.validate(), Err(LayerChainError::NoInitValues));

        let bad_blend = LayerChainConfig {
            salt: 0,
            ops: vec![
                LayerOp::Init { values: vec![1] },
                LayerOp::Blend { mode: BlendMode::Add, threshold: 1, chance: 0, min: 0, max: 3 },
            ],
        };
        assert!(matches!(bad_blend.validate(), Err(LayerChainError::InvalidBlend(1, _))));
    }

    #[test]
    fn built_chain_is_deterministic() {
        let chain = LayerChainConfig::ordinal(9, 4);
        let a = chain.build(42).expect("valid chain");
        let b = chain.build(42).expect("valid chain");
        assert_eq!(a.get_ints(-30, 12, 24, 24), b.get_ints(-30, 12, 24, 24));

        let values = a.get_ints(0, 0, 64, 64);
        assert!(values.iter().all(|v| (0..=4).contains(v)));
    }

    #[test]
    fn salt_and_seed_change_output() {
        let a = LayerChainConfig::uniform(1, 1000, 2).build(42).expect("valid");
        let b = LayerChainConfig::uniform(2, 1000, 2).build(42).expect("valid");
        let c = LayerChainConfig::uniform(1, 1000, 2).build(43).expect("valid");
        let window = |l: &Arc<dyn Layer>| l.get_ints(0, 0, 16, 16);
        assert_ne!(window(&a), window(&b));
        assert_ne!(window(&a), window(&c));
    }

    #[test]
    fn chain_round_trips_through_toml() {
        let chain = LayerChainConfig::ordinal(3, 5);
        let text = toml::to_string(&chain).expect("serialize");
        let back: LayerChainConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(back, chain);
    }
}
