//! Rock categories, concrete rocks, and the rock selection stage.

use crate::data_layer;
use crate::layer::DataLayer;
use crate::region::RegionContext;

data_layer! {
    /// Broad geological setting of a point.
    pub enum RockCategory {
        Oceanic => "oceanic",
        Land => "land",
        Volcanic => "volcanic",
        Uplift => "uplift",
    }
}

data_layer! {
    /// Concrete rock types, grouped by category.
    pub enum Rock {
        Gabbro => "gabbro",
        Shale => "shale",
        Claystone => "claystone",
        Chert => "chert",
        Granite => "granite",
        Diorite => "diorite",
        Limestone => "limestone",
        Conglomerate => "conglomerate",
        Dolomite => "dolomite",
        Chalk => "chalk",
        Basalt => "basalt",
        Andesite => "andesite",
        Dacite => "dacite",
        Rhyolite => "rhyolite",
        Quartzite => "quartzite",
        Slate => "slate",
        Phyllite => "phyllite",
        Schist => "schist",
        Gneiss => "gneiss",
        Marble => "marble",
    }
}

const OCEANIC_ROCKS: [Rock; 4] = [Rock::Gabbro, Rock::Shale, Rock::Claystone, Rock::Chert];
const LAND_ROCKS: [Rock; 6] = [
    Rock::Granite,
    Rock::Diorite,
    Rock::Limestone,
    Rock::Conglomerate,
    Rock::Dolomite,
    Rock::Chalk,
];
const VOLCANIC_ROCKS: [Rock; 4] = [Rock::Basalt, Rock::Andesite, Rock::Dacite, Rock::Rhyolite];
const UPLIFT_ROCKS: [Rock; 6] = [
    Rock::Quartzite,
    Rock::Slate,
    Rock::Phyllite,
    Rock::Schist,
    Rock::Gneiss,
    Rock::Marble,
];

impl RockCategory {
    pub fn rocks(self) -> &'static [Rock] {
        match self {
            RockCategory::Oceanic => &OCEANIC_ROCKS,
            RockCategory::Land => &LAND_ROCKS,
            RockCategory::Volcanic => &VOLCANIC_ROCKS,
            RockCategory::Uplift => &UPLIFT_ROCKS,
        }
    }
}

impl Rock {
    pub fn category(self) -> RockCategory {
        RockCategory::ALL
            .iter()
            .copied()
            .find(|category| category.rocks().contains(&self))
            .unwrap_or(RockCategory::Land)
    }
}

/// Marks land, base heights, and the rock category and rock of every point.
///
/// Category and heights come from noise at the point only. The concrete rock
/// is picked inside the category by the rock area.
pub fn choose_rocks(ctx: &mut RegionContext<'_>) {
    let fields = ctx.fields;
    let terrain = fields.terrain();

    for point in ctx.region.points_mut() {
        let continent = fields.continent(point.x, point.z);
        let volcanic = fields.volcanic(point.x, point.z) > terrain.volcanic_threshold;
        if continent > 0.0 {
            point.set_land(true);
            point.base_land_height = fields.land_height(continent);
            point.base_ocean_depth = 0;
            point.rock_category = if fields.uplift(point.x, point.z) > terrain.uplift_threshold {
                RockCategory::Uplift
            } else if volcanic {
                RockCategory::Volcanic
            } else {
                RockCategory::Land
            };
        } else {
            point.set_land(false);
            point.base_land_height = 0;
            point.base_ocean_depth = fields.ocean_depth(continent);
            point.rock_category = if volcanic {
                RockCategory::Volcanic
            } else {
                RockCategory::Oceanic
            };
        }
    }

    for point in ctx.region.points_mut() {
        let rocks = point.rock_category.rocks();
        let variant = ctx.rock_area.get(point.x, point.z).rem_euclid(rocks.len() as i32);
        point.rock = rocks[variant as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rock_has_exactly_one_category() {
        for rock in Rock::ALL {
            let owners = RockCategory::ALL
                .iter()
                .filter(|category| category.rocks().contains(rock))
                .count();
            assert_eq!(owners, 1, "{:?} belongs to {} categories", rock, owners);
        }
    }

    #[test]
    fn category_lookup_round_trips() {
        for category in RockCategory::ALL {
            for rock in category.rocks() {
                assert_eq!(rock.category(), *category);
            }
        }
        assert_eq!(Rock::count(), 20);
    }
}
