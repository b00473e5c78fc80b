//! Cave carving from the combined spaghetti densities.

use super::{CaveConfig, DensityContext, DensityFunction, Spaghetti2D, Spaghetti3D};

/// Union of the 2D and 3D spaghetti caves.
///
/// A block is carved where either function is open, so the combined density
/// is the minimum of the two.
#[derive(Debug, Clone)]
pub struct CaveCarver {
    caves: Spaghetti2D,
    tunnels: Spaghetti3D,
    min_y: i32,
    max_y: i32,
}

impl CaveCarver {
    pub fn new(cfg: &CaveConfig) -> Self {
        Self {
            caves: Spaghetti2D::new(cfg),
            tunnels: Spaghetti3D::new(cfg),
            min_y: cfg.min_y,
            max_y: cfg.max_y,
        }
    }

    pub fn density_at(&self, x: i32, y: i32, z: i32) -> f64 {
        self.compute(&DensityContext::new(x, y, z))
    }

    /// True if the block is open. Nothing outside the carvable range is carved.
    pub fn is_carved(&self, x: i32, y: i32, z: i32) -> bool {
        (self.min_y..=self.max_y).contains(&y) && self.density_at(x, y, z) < 0.0
    }

    /// Inclusive `(bottom, top)` runs of carved blocks in one column.
    pub fn carved_spans(&self, x: i32, z: i32, min_y: i32, max_y: i32) -> Vec<(i32, i32)> {
        let mut spans = Vec::new();
        let mut start = None;
        for y in min_y..=max_y {
            match (self.is_carved(x, y, z), start) {
                (true, None) => start = Some(y),
                (false, Some(bottom)) => {
                    spans.push((bottom, y - 1));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(bottom) = start {
            spans.push((bottom, max_y));
        }
        spans
    }
}

impl DensityFunction for CaveCarver {
    fn compute(&self, ctx: &DensityContext) -> f64 {
        self.caves.compute(ctx).min(self.tunnels.compute(ctx))
    }

    fn min(&self) -> f64 {
        self.caves.min().min(self.tunnels.min())
    }

    fn max(&self) -> f64 {
        self.caves.max().max(self.tunnels.max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carver_is_the_lower_of_both() {
        let cfg = CaveConfig::with_seed(42);
        let carver = CaveCarver::new(&cfg);
        let caves = Spaghetti2D::new(&cfg);
        let tunnels = Spaghetti3D::new(&cfg);
        for i in 0..500 {
            let ctx = DensityContext::new(i * 37 - 9000, (i % 300) - 40, 4000 - i * 13);
            let expected = caves.compute(&ctx).min(tunnels.compute(&ctx));
            assert_eq!(carver.compute(&ctx), expected);
        }
    }

    #[test]
    fn spans_match_point_queries() {
        let carver = CaveCarver::new(&CaveConfig::with_seed(7));
        for x in 0..8 {
            let spans = carver.carved_spans(x * 41, -x * 17, -64, 120);
            for y in -64..=120 {
                let inside = spans.iter().any(|&(bottom, top)| (bottom..=top).contains(&y));
                assert_eq!(inside, carver.is_carved(x * 41, y, -x * 17), "column {} y {}", x, y);
            }
        }
    }

    #[test]
    fn nothing_is_carved_outside_the_range() {
        let carver = CaveCarver::new(&CaveConfig::default());
        assert!(!carver.is_carved(0, -65, 0));
        assert!(!carver.is_carved(0, 321, 0));
    }
}
