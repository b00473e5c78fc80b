//! Planar segment helpers in grid units.

use glam::Vec2;

/// Squared distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment_sq(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    Counter,
}

fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if value == 0.0 {
        Orientation::Collinear
    } else if value > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Counter
    }
}

/// Whether `q` lies within the bounding box of `p`-`r`, for collinear points.
fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// True if segments `p1`-`q1` and `p2`-`q2` touch or cross.
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    (o1 != o2 && o3 != o4)
        || (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(distance_to_segment_sq(a, b, Vec2::new(5.0, 3.0)), 9.0);
        assert_eq!(distance_to_segment_sq(a, b, Vec2::new(-3.0, 4.0)), 25.0);
        assert_eq!(distance_to_segment_sq(a, b, Vec2::new(13.0, 0.0)), 9.0);
        assert_eq!(distance_to_segment_sq(a, a, Vec2::new(0.0, 2.0)), 4.0);
    }

    #[test]
    fn crossing_segments_intersect() {
        let v = Vec2::new;
        assert!(segments_intersect(v(0.0, 0.0), v(4.0, 4.0), v(0.0, 4.0), v(4.0, 0.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(1.0, 1.0), v(3.0, 0.0), v(4.0, 1.0)));
    }

    #[test]
    fn collinear_overlap_and_touching() {
        let v = Vec2::new;
        assert!(segments_intersect(v(0.0, 0.0), v(4.0, 0.0), v(2.0, 0.0), v(6.0, 0.0)));
        assert!(!segments_intersect(v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(3.0, 0.0)));
        assert!(segments_intersect(v(0.0, 0.0), v(2.0, 0.0), v(2.0, 0.0), v(2.0, 5.0)));
    }
}
