//! Per-coordinate random state for layer operations.

use super::mix_seed;

/// A small random generator seeded from `(layer seed, x, z)`.
///
/// Two instances created with the same arguments produce the same sequence,
/// regardless of what other coordinates have been sampled. The state lives on
/// the stack of whoever is computing a cell, so layers can run on many threads
/// without any synchronization.
#[derive(Debug, Clone, Copy)]
pub struct CoordRandom {
    layer_seed: i64,
    state: i64,
}

impl CoordRandom {
    /// Combines a world seed with a per-layer base seed.
    pub fn layer_seed(world_seed: i64, base_seed: i64) -> i64 {
        let mut seed = mix_seed(base_seed, base_seed);
        seed = mix_seed(seed, base_seed);
        seed = mix_seed(seed, base_seed);
        let mut layer = mix_seed(world_seed, seed);
        layer = mix_seed(layer, seed);
        mix_seed(layer, seed)
    }

    /// Creates the state for coordinate `(x, z)` of a layer.
    pub fn new(layer_seed: i64, x: i32, z: i32) -> Self {
        let mut state = mix_seed(layer_seed, x as i64);
        state = mix_seed(state, z as i64);
        state = mix_seed(state, x as i64);
        state = mix_seed(state, z as i64);
        Self { layer_seed, state }
    }

    /// Returns a value in `[0, bound)`. A non-positive bound yields 0.
    pub fn next_int(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        let value = (self.state >> 24).rem_euclid(bound as i64) as i32;
        self.state = mix_seed(self.state, self.layer_seed);
        value
    }

    /// Returns a value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.next_int(1 << 24) as f32 / (1 << 24) as f32
    }

    /// Picks one of `choices` uniformly.
    pub fn choose<T: Copy>(&mut self, choices: &[T]) -> T {
        choices[self.next_int(choices.len() as i32) as usize]
    }
}
