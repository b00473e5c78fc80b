//! Biome registry and the biome stages.
//!
//! Biome ids are a dense [`DataLayer`](crate::layer::DataLayer) registry:
//! - ocean tiers, shore, and lowland/highland land biomes chosen in
//!   [`choose_biomes`];
//! - mountain variants, altitude fits, and dry/wet replacements resolved in
//!   [`annotate_biome_altitude`];
//! - lake variants assigned while rivers and lakes are placed.
//!
//! [`BiomeId::NullMarker`] marks points no stage has visited yet.

mod choose;
mod config;

pub use choose::{annotate_biome_altitude, choose_biomes, seeded_choice};
pub use config::BiomeConfig;

use crate::data_layer;

data_layer! {
    /// Biome classification ID. `id()` is stable and dense.
    pub enum BiomeId {
        Ocean => "ocean",
        OceanReef => "ocean_reef",
        DeepOcean => "deep_ocean",
        DeepOceanTrench => "deep_ocean_trench",
        Shore => "shore",
        Plains => "plains",
        Hills => "hills",
        Lowlands => "lowlands",
        LowCanyons => "low_canyons",
        RollingHills => "rolling_hills",
        Highlands => "highlands",
        Badlands => "badlands",
        InvertedBadlands => "inverted_badlands",
        Plateau => "plateau",
        Canyons => "canyons",
        OldMountains => "old_mountains",
        Mountains => "mountains",
        VolcanicMountains => "volcanic_mountains",
        OceanicMountains => "oceanic_mountains",
        VolcanicOceanicMountains => "volcanic_oceanic_mountains",
        Lake => "lake",
        MountainLake => "mountain_lake",
        OldMountainLake => "old_mountain_lake",
        VolcanicMountainLake => "volcanic_mountain_lake",
        OceanicMountainLake => "oceanic_mountain_lake",
        PlateauLake => "plateau_lake",
        SaltFlats => "salt_flats",
        MudFlats => "mud_flats",
        DuneSea => "dune_sea",
        GrassyDunes => "grassy_dunes",
        NullMarker => "null_marker",
    }
}

impl BiomeId {
    pub fn is_ocean(self) -> bool {
        matches!(
            self,
            BiomeId::Ocean | BiomeId::OceanReef | BiomeId::DeepOcean | BiomeId::DeepOceanTrench
        )
    }

    pub fn is_shore(self) -> bool {
        self == BiomeId::Shore
    }

    pub fn is_lake(self) -> bool {
        matches!(
            self,
            BiomeId::Lake
                | BiomeId::MountainLake
                | BiomeId::OldMountainLake
                | BiomeId::VolcanicMountainLake
                | BiomeId::OceanicMountainLake
                | BiomeId::PlateauLake
        )
    }

    pub fn is_mountains(self) -> bool {
        matches!(
            self,
            BiomeId::OldMountains
                | BiomeId::Mountains
                | BiomeId::VolcanicMountains
                | BiomeId::OceanicMountains
                | BiomeId::VolcanicOceanicMountains
        )
    }

    pub fn is_marker(self) -> bool {
        self == BiomeId::NullMarker
    }

    /// The lake biome that replaces this biome inside a lake.
    pub fn lake_for(self) -> BiomeId {
        match self {
            BiomeId::Mountains => BiomeId::MountainLake,
            BiomeId::OldMountains => BiomeId::OldMountainLake,
            BiomeId::VolcanicMountains => BiomeId::VolcanicMountainLake,
            BiomeId::OceanicMountains | BiomeId::VolcanicOceanicMountains => BiomeId::OceanicMountainLake,
            BiomeId::Plateau => BiomeId::PlateauLake,
            b if b.is_lake() => b,
            _ => BiomeId::Lake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::DataLayer;

    #[test]
    fn registry_is_dense() {
        for (index, biome) in BiomeId::ALL.iter().enumerate() {
            assert_eq!(biome.id() as usize, index);
        }
        assert_eq!(BiomeId::from_id(BiomeId::NullMarker.id()), Some(BiomeId::NullMarker));
    }

    #[test]
    fn categories_do_not_overlap() {
        for biome in BiomeId::ALL {
            let groups = [biome.is_ocean(), biome.is_lake(), biome.is_mountains(), biome.is_shore(), biome.is_marker()];
            assert!(groups.iter().filter(|g| **g).count() <= 1, "{:?} is in several groups", biome);
        }
    }

    #[test]
    fn lake_variants_are_lakes() {
        for biome in BiomeId::ALL {
            assert!(biome.lake_for().is_lake(), "{:?} has a non-lake lake variant", biome);
        }
        assert_eq!(BiomeId::Mountains.lake_for(), BiomeId::MountainLake);
        assert_eq!(BiomeId::Plains.lake_for(), BiomeId::Lake);
    }
}
