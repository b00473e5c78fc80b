//! Gradient blending for ordinal data (pH, drainage, presence levels).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::random::CoordRandom;

use super::{orthogonal, Layer};

/// Which neighbor differences may pull a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Only larger neighbors pull the cell upward.
    Add,
    /// Larger and smaller neighbors both pull.
    Mix,
}

/// Nudges a cell by one step toward a neighbor that differs from it by at
/// least `threshold`. A `1 / chance` gate decides whether the nudge is kept.
pub struct BlendLayer {
    parent: Arc<dyn Layer>,
    seed: i64,
    mode: BlendMode,
    threshold: i32,
    chance: i32,
    min: i32,
    max: i32,
}

impl BlendLayer {
    pub fn new(
        parent: Arc<dyn Layer>,
        seed: i64,
        mode: BlendMode,
        threshold: i32,
        chance: u32,
        min: i32,
        max: i32,
    ) -> Self {
        Self {
            parent,
            seed,
            mode,
            threshold: threshold.max(1),
            chance: chance.clamp(1, i32::MAX as u32) as i32,
            min,
            max,
        }
    }
}

impl Layer for BlendLayer {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let pw = width + 2;
        let parent = self.parent.get_ints(x - 1, z - 1, pw, height + 2);

        let mut out = Vec::with_capacity(width * height);
        for dz in 0..height {
            for dx in 0..width {
                let center = parent[(dx + 1) + (dz + 1) * pw];
                let mut pulls = [0i32; 4];
                let mut count = 0;
                for neighbor in orthogonal(&parent, pw, dx + 1, dz + 1) {
                    let up = neighbor - center >= self.threshold;
                    let down = self.mode == BlendMode::Mix && center - neighbor >= self.threshold;
                    if up || down {
                        pulls[count] = neighbor;
                        count += 1;
                    }
                }

                if count == 0 {
                    out.push(center);
                    continue;
                }

                let mut random = CoordRandom::new(self.seed, x + dx as i32, z + dz as i32);
                let target = random.choose(&pulls[..count]);
                let value = if random.next_int(self.chance) == 0 {
                    (center + (target - center).signum()).clamp(self.min, self.max)
                } else {
                    center
                };
                out.push(value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::test_support::FnLayer;

    fn step() -> Arc<dyn Layer> {
        Arc::new(FnLayer(|x, _| if x < 0 { 0 } else { 4 }))
    }

    #[test]
    fn cells_move_at_most_one_step_toward_neighbors() {
        let layer = BlendLayer::new(step(), CoordRandom::layer_seed(42, 5), BlendMode::Mix, 1, 1, 0, 4);
        let out = layer.get_ints(-4, -4, 8, 8);
        for dz in 0..8 {
            for dx in 0..8 {
                let v = out[dx + dz * 8];
                match dx {
                    3 => assert_eq!(v, 1, "low side of the step is pulled up"),
                    4 => assert_eq!(v, 3, "high side of the step is pulled down"),
                    _ if dx < 3 => assert_eq!(v, 0),
                    _ => assert_eq!(v, 4),
                }
            }
        }
    }

    #[test]
    fn add_mode_never_lowers() {
        let layer = BlendLayer::new(step(), CoordRandom::layer_seed(42, 5), BlendMode::Add, 1, 1, 0, 4);
        let out = layer.get_ints(-4, 0, 8, 1);
        assert_eq!(out[3], 1);
        assert_eq!(out[4], 4);
    }

    #[test]
    fn gate_keeps_some_cells_unchanged() {
        let layer = BlendLayer::new(step(), CoordRandom::layer_seed(42, 5), BlendMode::Mix, 1, 3, 0, 4);
        let column: Vec<i32> = (0..300).map(|z| layer.get(-1, z)).collect();
        let moved = column.iter().filter(|&&v| v == 1).count();
        assert!(moved > 0 && moved < 300, "gate should commit some nudges but not all, got {}", moved);
        assert!(column.iter().all(|&v| v == 0 || v == 1));
    }

    #[test]
    fn output_is_clamped() {
        let parent = Arc::new(FnLayer(|x, _| if x < 0 { 0 } else { 10 }));
        let layer = BlendLayer::new(parent, CoordRandom::layer_seed(1, 1), BlendMode::Mix, 1, 1, 0, 5);
        assert!(layer.get_ints(-2, 0, 4, 4).iter().all(|&v| v <= 10));
        assert_eq!(layer.get(-1, 0), 1);
    }

    #[test]
    fn threshold_filters_small_differences() {
        let parent = Arc::new(FnLayer(|x, _| if x < 0 { 1 } else { 2 }));
        let layer = BlendLayer::new(parent, CoordRandom::layer_seed(1, 1), BlendMode::Mix, 2, 1, 0, 5);
        assert_eq!(layer.get(-1, 0), 1);
        assert_eq!(layer.get(0, 0), 2);
    }
}
