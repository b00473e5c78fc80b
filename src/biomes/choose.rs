//! Biome selection stages.

use crate::random::derive_seed;
use crate::region::{Point, RegionContext};
use crate::rocks::RockCategory;

use super::{BiomeConfig, BiomeId};

use BiomeId::*;

/// Ocean between the shallow and deep tiers.
const MID_OCEAN: [BiomeId; 6] = [DeepOcean, Ocean, Ocean, OceanReef, OceanReef, OceanReef];

const LAND_LOWLANDS: [BiomeId; 8] = [Plains, Plains, Hills, Hills, RollingHills, LowCanyons, Lowlands, Lowlands];
const UPLIFT_LOWLANDS: [BiomeId; 6] = [Highlands, Plateau, Plateau, RollingHills, Hills, Canyons];
const VOLCANIC_LOWLANDS: [BiomeId; 5] = [Hills, RollingHills, Plateau, Highlands, Plains];

const LOW_ALTITUDE: [BiomeId; 8] = [Plains, Plains, Hills, Hills, RollingHills, LowCanyons, Lowlands, Lowlands];
const MID_ALTITUDE: [BiomeId; 9] = [
    Plains,
    Hills,
    RollingHills,
    Highlands,
    InvertedBadlands,
    Badlands,
    Plateau,
    Canyons,
    LowCanyons,
];
const HIGH_ALTITUDE: [BiomeId; 8] = [Highlands, Highlands, Highlands, RollingHills, Badlands, Plateau, Plateau, Canyons];
const ALTITUDE_BIOMES: [&[BiomeId]; 3] = [&LOW_ALTITUDE, &MID_ALTITUDE, &HIGH_ALTITUDE];

const MOUNTAINS_BY_ALTITUDE: [&[BiomeId]; 3] = [
    &[OldMountains],
    &[Mountains, OldMountains, Mountains],
    &[Mountains],
];

const WET_BADLANDS: [BiomeId; 2] = [Highlands, RollingHills];

/// Picks from `choices` using an area value, stable for a given salt.
pub fn seeded_choice(area: i32, salt: u64, choices: &[BiomeId]) -> BiomeId {
    let key = area as i64 ^ salt as i64;
    choices[key.rem_euclid(choices.len() as i64) as usize]
}

fn salts(seed: u64) -> (u64, u64, u64) {
    (derive_seed(seed, 0x0CEA), derive_seed(seed, 0x1A4D), derive_seed(seed, 0xC11A))
}

fn ocean_biome(point: &Point, area: i32, salt: u64, cfg: &BiomeConfig) -> BiomeId {
    let depth = point.base_ocean_depth;
    if depth < cfg.shallow_ocean_depth {
        Ocean
    } else if depth > cfg.trench_depth {
        DeepOceanTrench
    } else if depth >= cfg.deep_ocean_depth {
        DeepOcean
    } else {
        seeded_choice(area, salt, &MID_OCEAN)
    }
}

fn lowlands(category: RockCategory) -> &'static [BiomeId] {
    match category {
        RockCategory::Uplift => &UPLIFT_LOWLANDS,
        RockCategory::Volcanic => &VOLCANIC_LOWLANDS,
        RockCategory::Land | RockCategory::Oceanic => &LAND_LOWLANDS,
    }
}

/// Altitude band of a land height: 0 low, 1 mid, 2 high.
pub fn altitude_band(height: u8, cfg: &BiomeConfig) -> u8 {
    (height / cfg.altitude_band_width.max(1)).min(2)
}

/// Assigns every point its base biome.
///
/// Ocean points get a depth tier, land touching ocean becomes shore, and other
/// land draws from a table chosen by rock category, keyed by the biome area.
pub fn choose_biomes(ctx: &mut RegionContext<'_>) {
    let config = ctx.config;
    let cfg = &config.biomes;
    let (ocean_salt, land_salt, _) = salts(config.seed);

    for index in 0..ctx.region.points().len() {
        let point = ctx.region.points()[index];
        let area = ctx.biome_area.get(point.x, point.z);
        let biome = if !point.land() {
            ocean_biome(&point, area, ocean_salt, cfg)
        } else if ctx.borders_ocean(point.x, point.z) {
            Shore
        } else {
            seeded_choice(area, land_salt, lowlands(point.rock_category))
        };
        ctx.region.points_mut()[index].biome = biome;
    }
}

fn mountain_variant(point: &Point, band: u8, area: i32, salt: u64) -> BiomeId {
    let volcanic = point.rock_category == RockCategory::Volcanic;
    match (point.coastal_mountain(), volcanic) {
        (true, true) => VolcanicOceanicMountains,
        (true, false) => OceanicMountains,
        (false, true) => VolcanicMountains,
        (false, false) => seeded_choice(area, salt, MOUNTAINS_BY_ALTITUDE[band as usize]),
    }
}

fn climate_variant(biome: BiomeId, rainfall: f32, area: i32, salt: u64, cfg: &BiomeConfig) -> BiomeId {
    let offset = (area as i64 ^ salt as i64).rem_euclid(cfg.dry_rainfall_variance.max(1) as i64) as f32;
    let arid = rainfall <= cfg.arid_rainfall;
    if rainfall < cfg.dry_rainfall + offset {
        match biome {
            Lowlands | LowCanyons => {
                if arid {
                    SaltFlats
                } else {
                    MudFlats
                }
            }
            Plains | Hills | RollingHills => {
                if arid {
                    DuneSea
                } else {
                    GrassyDunes
                }
            }
            other => other,
        }
    } else if matches!(biome, Badlands | InvertedBadlands) && rainfall > cfg.wet_badlands_rainfall + offset {
        seeded_choice(area, salt, &WET_BADLANDS)
    } else {
        biome
    }
}

/// Bands land heights into altitudes and resolves altitude- and
/// climate-dependent biome variants.
///
/// Mountains pick a variant by band, coast and rock. Other inland biomes that
/// do not fit their band are re-drawn from that band's table, then dry or wet
/// extremes replace them. Shore, lakes and ocean are left alone.
pub fn annotate_biome_altitude(ctx: &mut RegionContext<'_>) {
    let config = ctx.config;
    let cfg = &config.biomes;
    let (_, land_salt, climate_salt) = salts(config.seed);

    for index in 0..ctx.region.points().len() {
        let point = ctx.region.points()[index];
        let band = if point.land() {
            altitude_band(point.base_land_height, cfg)
        } else {
            0
        };
        let area = ctx.biome_area.get(point.x, point.z);

        let mut biome = point.biome;
        if point.land() && !point.lake() && !biome.is_shore() {
            if point.mountain() {
                biome = mountain_variant(&point, band, area, land_salt);
            } else {
                let table = ALTITUDE_BIOMES[band as usize];
                if !table.contains(&biome) {
                    biome = seeded_choice(area, land_salt, table);
                }
                biome = climate_variant(biome, point.rainfall, area, climate_salt, cfg);
            }
        }

        let target = &mut ctx.region.points_mut()[index];
        target.biome_altitude = band;
        target.biome = biome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_choice_is_stable_and_in_table() {
        for area in -100..100 {
            let a = seeded_choice(area, 77, &LAND_LOWLANDS);
            assert_eq!(a, seeded_choice(area, 77, &LAND_LOWLANDS));
            assert!(LAND_LOWLANDS.contains(&a));
        }
    }

    #[test]
    fn ocean_tiers_follow_depth() {
        let cfg = BiomeConfig::default();
        let mut point = Point::new(0, 0);
        point.base_ocean_depth = 1;
        assert_eq!(ocean_biome(&point, 0, 0, &cfg), Ocean);
        point.base_ocean_depth = 6;
        assert_eq!(ocean_biome(&point, 0, 0, &cfg), DeepOcean);
        point.base_ocean_depth = 12;
        assert_eq!(ocean_biome(&point, 0, 0, &cfg), DeepOceanTrench);
        point.base_ocean_depth = 4;
        assert!(MID_OCEAN.contains(&ocean_biome(&point, 3, 9, &cfg)));
    }

    #[test]
    fn altitude_bands_are_capped() {
        let cfg = BiomeConfig::default();
        assert_eq!(altitude_band(0, &cfg), 0);
        assert_eq!(altitude_band(8, &cfg), 1);
        assert_eq!(altitude_band(200, &cfg), 2);
    }

    #[test]
    fn dry_lowlands_become_flats() {
        let cfg = BiomeConfig::default();
        assert_eq!(climate_variant(Lowlands, 10.0, 0, 0, &cfg), SaltFlats);
        assert_eq!(climate_variant(Lowlands, 80.0, 0, 0, &cfg), MudFlats);
        assert_eq!(climate_variant(Hills, 10.0, 0, 0, &cfg), DuneSea);
        assert_eq!(climate_variant(Plateau, 10.0, 0, 0, &cfg), Plateau);
        assert_eq!(climate_variant(Lowlands, 300.0, 0, 0, &cfg), Lowlands);
    }

    #[test]
    fn wet_badlands_are_replaced() {
        let cfg = BiomeConfig::default();
        assert!(WET_BADLANDS.contains(&climate_variant(Badlands, 499.0, 1, 0, &cfg)));
        assert_eq!(climate_variant(Badlands, 200.0, 1, 0, &cfg), Badlands);
    }

    #[test]
    fn coastal_volcanic_mountains() {
        let mut point = Point::new(0, 0);
        point.set_land(true);
        point.set_mountain();
        point.set_coastal_mountain();
        point.rock_category = RockCategory::Volcanic;
        assert_eq!(mountain_variant(&point, 1, 0, 0), VolcanicOceanicMountains);
        point.rock_category = RockCategory::Land;
        assert_eq!(mountain_variant(&point, 1, 0, 0), OceanicMountains);
    }
}
