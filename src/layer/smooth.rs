//! Outlier removal.

use std::sync::Arc;

use super::{orthogonal, Layer};

/// Replaces a cell when at least three of its four orthogonal neighbors share
/// a value different from it.
pub struct SmoothLayer {
    parent: Arc<dyn Layer>,
}

impl SmoothLayer {
    pub fn new(parent: Arc<dyn Layer>) -> Self {
        Self { parent }
    }
}

impl Layer for SmoothLayer {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        let pw = width + 2;
        let parent = self.parent.get_ints(x - 1, z - 1, pw, height + 2);

        let mut out = Vec::with_capacity(width * height);
        for dz in 0..height {
            for dx in 0..width {
                let center = parent[(dx + 1) + (dz + 1) * pw];
                let neighbors = orthogonal(&parent, pw, dx + 1, dz + 1);
                let majority = neighbors.iter().copied().find(|&candidate| {
                    candidate != center && neighbors.iter().filter(|&&n| n == candidate).count() >= 3
                });
                out.push(majority.unwrap_or(center));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::test_support::FnLayer;

    #[test]
    fn isolated_cell_is_removed() {
        let parent = Arc::new(FnLayer(|x, z| if x == 0 && z == 0 { 9 } else { 1 }));
        let smooth = SmoothLayer::new(parent);
        assert_eq!(smooth.get(0, 0), 1);
        assert_eq!(smooth.get(1, 0), 1);
    }

    #[test]
    fn edges_between_regions_are_kept() {
        // A straight boundary: every cell has at most two differing neighbors.
        let parent = Arc::new(FnLayer(|x, _| if x < 0 { 2 } else { 5 }));
        let smooth = SmoothLayer::new(parent);
        let out = smooth.get_ints(-3, -3, 6, 6);
        for dz in 0..6 {
            for dx in 0..6 {
                let expected = if dx < 3 { 2 } else { 5 };
                assert_eq!(out[dx + dz * 6], expected);
            }
        }
    }

    #[test]
    fn peninsula_tip_is_absorbed() {
        // The tip of a one-cell-wide spike has three neighbors of the other value.
        let parent = Arc::new(FnLayer(|x, z| if z == 0 && x <= 0 { 7 } else { 3 }));
        let smooth = SmoothLayer::new(parent);
        assert_eq!(smooth.get(0, 0), 3);
        assert_eq!(smooth.get(-1, 0), 7);
    }
}
