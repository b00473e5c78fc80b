//! River segments with a fractal channel.

use glam::Vec2;

use super::MidpointFractal;

/// One immutable river segment between two positions in grid units.
///
/// Edges refer to positions, not points, so an edge may reach into a
/// neighboring region without owning anything there.
#[derive(Debug, Clone, PartialEq)]
pub struct RiverEdge {
    source: Vec2,
    drain: Vec2,
    width: f32,
    fractal: MidpointFractal,
}

impl RiverEdge {
    pub fn new(seed: u64, source: Vec2, drain: Vec2, depth: u32, width: f32) -> Self {
        Self {
            source,
            drain,
            width,
            fractal: MidpointFractal::new(seed, source, drain, depth),
        }
    }

    pub fn source(&self) -> Vec2 {
        self.source
    }

    pub fn drain(&self) -> Vec2 {
        self.drain
    }

    /// Half width of the channel.
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn fractal(&self) -> &MidpointFractal {
        &self.fractal
    }

    /// Whether the channel, widened by `margin`, may reach the box `min..max`.
    pub fn may_touch(&self, min: Vec2, max: Vec2, margin: f32) -> bool {
        let (lo, hi) = self.fractal.bounds();
        let reach = self.width + margin;
        lo.x - reach <= max.x && hi.x + reach >= min.x && lo.y - reach <= max.y && hi.y + reach >= min.y
    }

    /// Distance from `(x, z)` to the center line, if within `reach` of it.
    pub fn distance_within(&self, x: f32, z: f32, reach: f32) -> Option<f32> {
        if !self.fractal.maybe_intersect(x, z, reach) {
            return None;
        }
        let d = self.fractal.distance_sq(x, z).sqrt();
        (d <= reach).then_some(d)
    }

    /// True if `(x, z)` lies inside the channel.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        self.fractal.intersect(x, z, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_in_the_channel() {
        let edge = RiverEdge::new(1, Vec2::new(2.0, 2.0), Vec2::new(8.0, 3.0), 4, 0.4);
        assert!(edge.contains(2.0, 2.0));
        assert!(edge.contains(8.0, 3.0));
        assert!(!edge.contains(2.0, 6.0));
    }

    #[test]
    fn may_touch_uses_the_width() {
        let edge = RiverEdge::new(1, Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 0, 0.5);
        assert!(edge.may_touch(Vec2::new(0.4, 0.0), Vec2::new(4.0, 4.0), 0.0));
        assert!(!edge.may_touch(Vec2::new(0.6, 0.0), Vec2::new(4.0, 4.0), 0.0));
        assert!(edge.may_touch(Vec2::new(0.6, 0.0), Vec2::new(4.0, 4.0), 0.2));
    }

    #[test]
    fn distance_within_reach() {
        let edge = RiverEdge::new(5, Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 0, 0.3);
        assert_eq!(edge.distance_within(5.0, 2.0, 3.0), Some(2.0));
        assert_eq!(edge.distance_within(5.0, 4.0, 3.0), None);
    }
}
