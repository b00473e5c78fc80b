//! Generator layer: seeds a grid with categorical values.

use crate::random::CoordRandom;

use super::Layer;

/// Picks uniformly among `values` at every coordinate.
#[derive(Debug, Clone)]
pub struct InitLayer {
    seed: i64,
    values: Vec<i32>,
}

impl InitLayer {
    /// `values` must be non-empty; chains validate this before construction.
    pub fn new(seed: i64, values: Vec<i32>) -> Self {
        Self { seed, values }
    }
}

impl Layer for InitLayer {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let mut out = Vec::with_capacity(width * height);
        if self.values.is_empty() {
            out.resize(width * height, 0);
            return out;
        }
        for dz in 0..height as i32 {
            for dx in 0..width as i32 {
                let mut random = CoordRandom::new(self.seed, x + dx, z + dz);
                out.push(random.choose(&self.values));
            }
        }
        out
    }
}
