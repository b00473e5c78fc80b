//! Recursive midpoint displacement of a straight segment.

use glam::Vec2;

use crate::random::unit_hash;

use super::geometry::distance_to_segment_sq;

/// Displacement of the first midpoint, as a fraction of the segment length.
const BASE_DISPLACEMENT: f32 = 0.35;
/// Displacement factor applied per level of depth.
const DISPLACEMENT_DECAY: f32 = 0.7;
/// Segments shorter than this are split without displacement.
const MIN_SEGMENT_LENGTH: f32 = 0.05;

/// A polyline from `source` to `drain` built by repeatedly splitting every
/// segment at a perpendicularly displaced midpoint.
///
/// With depth `d` there are always `2^d + 1` points. The first is exactly the
/// source and the last exactly the drain.
#[derive(Debug, Clone, PartialEq)]
pub struct MidpointFractal {
    depth: u32,
    points: Vec<Vec2>,
    min: Vec2,
    max: Vec2,
}

impl MidpointFractal {
    pub fn new(seed: u64, source: Vec2, drain: Vec2, depth: u32) -> Self {
        let mut points = vec![source, drain];

        for level in 0..depth {
            let scale = BASE_DISPLACEMENT * DISPLACEMENT_DECAY.powi(level as i32);
            let first_id = 1u64 << level;
            let mut next = Vec::with_capacity(points.len() * 2 - 1);

            for (j, pair) in points.windows(2).enumerate() {
                let (a, b) = (pair[0], pair[1]);
                let delta = b - a;
                let len = delta.length();
                let mid = (a + b) * 0.5;

                next.push(a);
                if len < MIN_SEGMENT_LENGTH {
                    next.push(mid);
                } else {
                    let normal = delta.perp() / len;
                    let offset = unit_hash(seed, first_id + j as u64) * scale * len;
                    next.push(mid + normal * offset);
                }
            }
            next.push(drain);
            points = next;
        }

        let (min, max) = points
            .iter()
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), p| (lo.min(*p), hi.max(*p)));

        Self { depth, points, min, max }
    }

    /// Points from source to drain.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn source(&self) -> Vec2 {
        self.points[0]
    }

    pub fn drain(&self) -> Vec2 {
        self.points[self.points.len() - 1]
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Axis-aligned bounds of all points, `(min, max)`.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.min, self.max)
    }

    /// Cheap rejection: false if `(x, z)` is farther than `tolerance` from the bounds.
    pub fn maybe_intersect(&self, x: f32, z: f32, tolerance: f32) -> bool {
        x >= self.min.x - tolerance
            && x <= self.max.x + tolerance
            && z >= self.min.y - tolerance
            && z <= self.max.y + tolerance
    }

    /// Squared distance from `(x, z)` to the nearest segment.
    pub fn distance_sq(&self, x: f32, z: f32) -> f32 {
        let p = Vec2::new(x, z);
        self.points
            .windows(2)
            .map(|pair| distance_to_segment_sq(pair[0], pair[1], p))
            .fold(f32::MAX, f32::min)
    }

    /// True if `(x, z)` lies within `tolerance` of the polyline.
    pub fn intersect(&self, x: f32, z: f32, tolerance: f32) -> bool {
        self.maybe_intersect(x, z, tolerance) && self.distance_sq(x, z) <= tolerance * tolerance
    }

    /// Upper bound on how far any point can stray from the straight line
    /// between source and drain, for a segment of length `len`.
    pub fn deviation_bound(len: f32, depth: u32) -> f32 {
        let mut bound = 0.0;
        let mut segment = len;
        for level in 0..depth {
            let scale = BASE_DISPLACEMENT * DISPLACEMENT_DECAY.powi(level as i32);
            bound += scale * segment;
            segment *= (0.25 + scale * scale).sqrt();
        }
        bound
    }
}
