//! Dense integer registries for generation values.

/// A fixed enumeration whose ids are dense in `0..ALL.len()`.
///
/// Dense ids let values be stored in arrays and produced directly by layer
/// chains, whose cells are plain integers.
pub trait DataLayer: Copy + Eq + std::fmt::Debug + 'static {
    /// Every value, in id order.
    const ALL: &'static [Self];

    fn id(self) -> u8;

    fn name(self) -> &'static str;

    fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Maps a raw layer value onto the registry, clamping out-of-range values.
    fn from_layer_value(value: i32) -> Self {
        let last = Self::ALL.len() as i32 - 1;
        Self::ALL[value.clamp(0, last.max(0)) as usize]
    }

    fn count() -> usize {
        Self::ALL.len()
    }
}

/// Declares a `#[repr(u8)]` enum implementing [`DataLayer`].
///
/// Variants are numbered in declaration order, so ids are dense by construction.
#[macro_export]
macro_rules! data_layer {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::layer::DataLayer for $name {
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn id(self) -> u8 {
                self as u8
            }

            fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }
    };
}

data_layer! {
    /// Soil acidity.
    pub enum PhLevel {
        StronglyAcidic => "strongly_acidic",
        Acidic => "acidic",
        Neutral => "neutral",
        Alkaline => "alkaline",
        StronglyAlkaline => "strongly_alkaline",
    }
}

data_layer! {
    /// Soil drainage.
    pub enum Drainage {
        None => "none",
        VeryPoor => "very_poor",
        Poor => "poor",
        Normal => "normal",
        Good => "good",
        VeryGood => "very_good",
    }
}
