//! Per-grid-cell generation record.

use crate::biomes::BiomeId;
use crate::rocks::{Rock, RockCategory};

const LAND: u8 = 1 << 0;
const RIVER: u8 = 1 << 1;
const LAKE: u8 = 1 << 2;
const MOUNTAIN: u8 = 1 << 3;
const COASTAL_MOUNTAIN: u8 = 1 << 4;
const ABSENT: u8 = 1 << 7;

/// Distance value for land with no ocean reachable inside its cell.
pub const DISTANCE_UNKNOWN: u8 = u8::MAX;

/// One grid cell of a [`Region`](super::Region).
///
/// Created unset when its region is allocated, then filled in place by the
/// pipeline stages. Read-only once the region is cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Grid x coordinate.
    pub x: i32,
    /// Grid z coordinate.
    pub z: i32,
    pub biome: BiomeId,
    pub rock: Rock,
    pub rock_category: RockCategory,
    /// Height units above sea level. Zero for ocean.
    pub base_land_height: u8,
    /// Depth units below sea level. Zero for land.
    pub base_ocean_depth: u8,
    /// 0 for ocean, BFS steps to the nearest ocean point for land.
    pub distance_to_ocean: u8,
    /// Steps to the nearest border of the owning cell.
    pub distance_to_edge: u8,
    /// Discrete altitude band.
    pub biome_altitude: u8,
    /// Mean annual temperature, °C.
    pub temperature: f32,
    /// Annual rainfall, mm.
    pub rainfall: f32,
    flags: u8,
}

impl Point {
    /// Sentinel returned for coordinates outside a region or the world bound.
    pub const ABSENT: Point = Point {
        x: i32::MIN,
        z: i32::MIN,
        biome: BiomeId::Ocean,
        rock: Rock::Gabbro,
        rock_category: RockCategory::Oceanic,
        base_land_height: 0,
        base_ocean_depth: 0,
        distance_to_ocean: 0,
        distance_to_edge: 0,
        biome_altitude: 0,
        temperature: 0.0,
        rainfall: 0.0,
        flags: ABSENT,
    };

    /// An unset point at grid `(x, z)`.
    pub fn new(x: i32, z: i32) -> Self {
        Self {
            x,
            z,
            biome: BiomeId::NullMarker,
            flags: 0,
            distance_to_ocean: DISTANCE_UNKNOWN,
            ..Self::ABSENT
        }
    }

    pub fn is_absent(&self) -> bool {
        self.flags & ABSENT != 0
    }

    pub fn land(&self) -> bool {
        self.flags & LAND != 0
    }

    pub fn river(&self) -> bool {
        self.flags & RIVER != 0
    }

    pub fn lake(&self) -> bool {
        self.flags & LAKE != 0
    }

    pub fn mountain(&self) -> bool {
        self.flags & MOUNTAIN != 0
    }

    pub fn coastal_mountain(&self) -> bool {
        self.flags & COASTAL_MOUNTAIN != 0
    }

    pub fn set_land(&mut self, land: bool) {
        self.set(LAND, land);
    }

    pub fn set_river(&mut self) {
        self.set(RIVER, true);
    }

    pub fn set_lake(&mut self) {
        self.set(LAKE, true);
    }

    pub fn set_mountain(&mut self) {
        self.set(MOUNTAIN, true);
    }

    pub fn set_coastal_mountain(&mut self) {
        self.set(COASTAL_MOUNTAIN, true);
    }

    /// Signed height in units: positive on land, negative under the ocean.
    pub fn height_units(&self) -> i32 {
        if self.land() {
            self.base_land_height as i32
        } else {
            -(self.base_ocean_depth as i32)
        }
    }

    fn set(&mut self, flag: u8, value: bool) {
        if value {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_is_unset() {
        let point = Point::new(3, -4);
        assert_eq!((point.x, point.z), (3, -4));
        assert_eq!(point.biome, BiomeId::NullMarker);
        assert!(!point.is_absent());
        assert!(!point.land());
        assert_eq!(point.distance_to_ocean, DISTANCE_UNKNOWN);
    }

    #[test]
    fn absent_point_is_ocean() {
        let point = Point::ABSENT;
        assert!(point.is_absent());
        assert!(point.biome.is_ocean());
        assert!(!point.land());
    }

    #[test]
    fn flags_are_independent() {
        let mut point = Point::new(0, 0);
        point.set_land(true);
        point.set_mountain();
        point.set_river();
        assert!(point.land() && point.mountain() && point.river());
        assert!(!point.lake() && !point.coastal_mountain());
        point.set_land(false);
        assert!(!point.land());
        assert!(point.mountain());
    }

    #[test]
    fn height_units_are_signed() {
        let mut point = Point::new(0, 0);
        point.base_ocean_depth = 6;
        assert_eq!(point.height_units(), -6);
        point.set_land(true);
        point.base_land_height = 11;
        assert_eq!(point.height_units(), 11);
    }
}
