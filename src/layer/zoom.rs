//! Resolution-doubling layers.

use std::sync::Arc;

use crate::random::CoordRandom;

use super::Layer;

/// Doubles the resolution of its parent.
///
/// Output `(ox, oz)` reads parent cell `(ox >> 1, oz >> 1)` and its `+x`, `+z`
/// and diagonal neighbors. In normal mode the even/even output copies the
/// parent directly and the other three pick randomly among the adjacent parent
/// values, which roughens boundaries. In fuzzy mode every position is random.
pub struct ZoomLayer {
    parent: Arc<dyn Layer>,
    seed: i64,
    fuzzy: bool,
}

impl ZoomLayer {
    pub fn new(parent: Arc<dyn Layer>, seed: i64) -> Self {
        Self { parent, seed, fuzzy: false }
    }

    pub fn fuzzy(parent: Arc<dyn Layer>, seed: i64) -> Self {
        Self { parent, seed, fuzzy: true }
    }
}

impl Layer for ZoomLayer {
    fn get_ints(&self, x: i32, z: i32, width: usize, height: usize) -> Vec<i32> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let px = x >> 1;
        let pz = z >> 1;
        let pw = (((x + width as i32 - 1) >> 1) - px + 2) as usize;
        let ph = (((z + height as i32 - 1) >> 1) - pz + 2) as usize;
        let parent = self.parent.get_ints(px, pz, pw, ph);

        let mut out = Vec::with_capacity(width * height);
        for dz in 0..height as i32 {
            let oz = z + dz;
            let iz = ((oz >> 1) - pz) as usize;
            for dx in 0..width as i32 {
                let ox = x + dx;
                let ix = ((ox >> 1) - px) as usize;

                let p00 = parent[ix + iz * pw];
                let p10 = parent[ix + 1 + iz * pw];
                let p01 = parent[ix + (iz + 1) * pw];
                let p11 = parent[ix + 1 + (iz + 1) * pw];

                let mut random = CoordRandom::new(self.seed, ox, oz);
                let value = if self.fuzzy {
                    random.choose(&[p00, p10, p01, p11])
                } else {
                    match (ox & 1, oz & 1) {
                        (0, 0) => p00,
                        (1, 0) => random.choose(&[p00, p10]),
                        (0, _) => random.choose(&[p00, p01]),
                        _ => random.choose(&[p00, p10, p01, p11]),
                    }
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
    use crate::layer::InitLayer;

    fn parent() -> Arc<dyn Layer> {
        Arc::new(InitLayer::new(CoordRandom::layer_seed(42, 11), (0..32).collect()))
    }

    #[test]
    fn output_has_requested_size() {
        let zoom = ZoomLayer::new(parent(), CoordRandom::layer_seed(42, 12));
        assert_eq!(zoom.get_ints(-7, 3, 13, 5).len(), 65);
        assert!(zoom.get_ints(0, 0, 0, 4).is_empty());
    }

    #[test]
    fn even_cells_copy_the_parent() {
        let parent = parent();
        let zoom = ZoomLayer::new(parent.clone(), CoordRandom::layer_seed(42, 12));

        // An N x N parent window maps onto a 2N x 2N output window.
        let n = 16;
        let source = parent.get_ints(-8, -8, n, n);
        let zoomed = zoom.get_ints(-16, -16, 2 * n, 2 * n);
        for pz in 0..n {
            for px in 0..n {
                let expected = source[px + pz * n];
                let actual = zoomed[(2 * px) + (2 * pz) * (2 * n)];
                assert_eq!(actual, expected, "even cell ({}, {}) must copy its parent", px, pz);
            }
        }
    }

    #[test]
    fn odd_cells_choose_from_adjacent_parents() {
        let parent = parent();
        let zoom = ZoomLayer::new(parent.clone(), CoordRandom::layer_seed(42, 12));
        for oz in -10..10 {
            for ox in -10..10 {
                let value = zoom.get(ox, oz);
                let (px, pz) = (ox >> 1, oz >> 1);
                let candidates = [
                    parent.get(px, pz),
                    parent.get(px + 1, pz),
                    parent.get(px, pz + 1),
                    parent.get(px + 1, pz + 1),
                ];
                assert!(candidates.contains(&value));
            }
        }
    }

    #[test]
    fn result_does_not_depend_on_window() {
        let zoom = ZoomLayer::fuzzy(parent(), CoordRandom::layer_seed(42, 13));
        let big = zoom.get_ints(-5, -5, 10, 10);
        for dz in 0..10 {
            for dx in 0..10 {
                assert_eq!(big[dx + dz * 10], zoom.get(-5 + dx as i32, -5 + dz as i32));
            }
        }
    }

    #[test]
    fn uniform_parent_stays_uniform() {
        let zoom = ZoomLayer::fuzzy(Arc::new(FnLayer(|_, _| 4)), CoordRandom::layer_seed(1, 1));
        assert!(zoom.get_ints(0, 0, 9, 9).iter().all(|&v| v == 4));
    }
}
