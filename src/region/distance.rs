//! Distance transforms over a region's points.

use std::collections::VecDeque;

use super::{Region, RegionContext, DISTANCE_UNKNOWN, ORTHOGONAL};

/// Writes `distance_to_ocean` and `distance_to_edge` for every point.
///
/// Ocean points have distance 0. Land distances are breadth-first steps over
/// the 4-neighborhood from the ocean points of this cell, saturating below
/// [`DISTANCE_UNKNOWN`]. Land with no ocean reachable inside the cell keeps
/// [`DISTANCE_UNKNOWN`].
pub fn annotate_distances(ctx: &mut RegionContext<'_>) {
    annotate_ocean_distance(ctx.region);
    annotate_edge_distance(ctx.region);
}

fn annotate_ocean_distance(region: &mut Region) {
    let total = region.points().len();
    let mut steps = vec![u32::MAX; total];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for (index, point) in region.points().iter().enumerate() {
        if !point.land() {
            steps[index] = 0;
            queue.push_back(index);
        }
    }

    while let Some(index) = queue.pop_front() {
        let d = steps[index];
        for next in region.neighbors(index, &ORTHOGONAL) {
            if steps[next] == u32::MAX {
                steps[next] = d.saturating_add(1);
                queue.push_back(next);
            }
        }
    }

    for (point, &d) in region.points_mut().iter_mut().zip(&steps) {
        point.distance_to_ocean = if d == u32::MAX {
            DISTANCE_UNKNOWN
        } else {
            d.min(DISTANCE_UNKNOWN as u32 - 1) as u8
        };
    }
}

fn annotate_edge_distance(region: &mut Region) {
    let n = region.size();
    for index in 0..region.points().len() {
        let (lx, lz) = region.local(index);
        let d = lx.min(lz).min(n - 1 - lx).min(n - 1 - lz);
        region.points_mut()[index].distance_to_edge = d.min(u8::MAX as usize) as u8;
    }
}
