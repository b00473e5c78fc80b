//! Mountain placement stage.

use crate::biomes::BiomeId;
use crate::random::CoordRandom;
use crate::rocks::RockCategory;

use super::{RegionContext, ADJACENT};

const MOUNTAIN_SALT: i64 = 1_870_342;

/// Promotes land points on strong ridges to mountains.
///
/// A point qualifies when the ridged mountain field exceeds the threshold,
/// which is lowered on uplift rock and next to already high ground. Qualifying
/// points pass a coordinate-keyed gate whose chance grows with the excess over
/// the threshold, then gain height and the `Mountains` base biome. Mountains
/// with ocean nearby are flagged coastal.
///
/// All candidates are decided against heights from before this stage, so the
/// outcome at a point does not depend on iteration order.
pub fn add_mountains(ctx: &mut RegionContext<'_>) {
    let fields = ctx.fields;
    let terrain = fields.terrain();
    let layer_seed = CoordRandom::layer_seed(ctx.config.seed as i64, MOUNTAIN_SALT);

    let mut promoted = Vec::new();
    for index in 0..ctx.region.points().len() {
        let point = ctx.region.points()[index];
        if !point.land() {
            continue;
        }

        let mut threshold = terrain.mountain_threshold;
        if point.rock_category == RockCategory::Uplift {
            threshold -= terrain.mountain_uplift_bonus;
        }
        let near_high = ADJACENT
            .iter()
            .any(|&(dx, dz)| ctx.land_height_at(point.x + dx, point.z + dz) >= terrain.high_point_height);
        if near_high {
            threshold -= terrain.mountain_proximity_bonus;
        }

        let ridge = fields.mountains(point.x, point.z);
        if ridge <= threshold {
            continue;
        }
        let excess = ((ridge - threshold) / (1.0 - threshold).max(f32::EPSILON)).clamp(0.0, 1.0);

        let mut random = CoordRandom::new(layer_seed, point.x, point.z);
        if random.next_f32() >= 0.35 + 0.65 * excess {
            continue;
        }

        let gain = terrain.mountain_height as f32 * (0.4 + 0.6 * excess);
        let height = (point.base_land_height as f32 + gain).min(u8::MAX as f32) as u8;
        let coastal = ctx.ocean_within(point.x, point.z, terrain.coastal_mountain_radius);
        promoted.push((index, height, coastal));
    }

    let points = ctx.region.points_mut();
    for (index, height, coastal) in promoted {
        let point = &mut points[index];
        point.set_mountain();
        if coastal {
            point.set_coastal_mountain();
        }
        point.base_land_height = height;
        point.biome = BiomeId::Mountains;
    }
}
