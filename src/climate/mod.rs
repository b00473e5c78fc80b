//! Climate annotation.
//!
//! Temperature follows periodic bands along z and rainfall periodic bands along
//! x, each perturbed by smooth fractal noise. Land points then cool with
//! altitude and gain rainfall near the coast.

mod config;
mod moisture;
mod temperature;
mod util;

pub use config::ClimateConfig;
pub use moisture::{rainfall_mm, with_coastal_bonus};
pub use temperature::{temperature_c, with_lapse};
pub use util::{map_unit, triangle};

use crate::region::RegionContext;

/// Writes temperature and rainfall into every point of the region.
///
/// Requires distances and final land heights.
pub fn annotate_climate(ctx: &mut RegionContext<'_>) {
    let cfg = &ctx.config.climate;
    for point in ctx.region.points_mut() {
        let temperature = temperature_c(point.x, point.z, cfg);
        let rainfall = rainfall_mm(point.x, point.z, cfg);
        if point.land() {
            point.temperature = with_lapse(temperature, point.height_units(), cfg);
            point.rainfall = with_coastal_bonus(rainfall, point.distance_to_ocean, cfg);
        } else {
            point.temperature = temperature;
            point.rainfall = rainfall;
        }
    }
}
