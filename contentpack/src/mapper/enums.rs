//! Enum translation between descriptor schemas and host schemas.
//!
//! Descriptor enums and host enums are separate types that happen to share
//! variant names. Translation goes through the name; a source value without
//! a same-named target variant is an error.

use serde::Deserialize;

use super::error::{MappingError, MappingResult};

/// An enum whose variants can be listed and looked up by name.
pub trait NamedEnum: Sized + Copy + 'static {
    const TYPE_NAME: &'static str;
    const VARIANTS: &'static [Self];

    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

/// Translate `value` into the same-named variant of `T`.
pub fn translate_enum<S: NamedEnum, T: NamedEnum>(value: S) -> MappingResult<T> {
    T::from_name(value.name()).ok_or(MappingError::UnmappedEnum {
        source_type: S::TYPE_NAME,
        target_type: T::TYPE_NAME,
        value: value.name(),
    })
}

macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$variant_meta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl NamedEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

named_enum! {
    /// Body region as written in clothing descriptors.
    #[derive(Deserialize)]
    BodyRegion { Hands, Head, Chest, Legs, Feet, Accessory }
}

named_enum! {
    /// Host clothing slot.
    ClothingRegion { Hands, Head, Chest, Legs, Feet, Accessory }
}

named_enum! {
    /// Clothing layer, shared by descriptors and the host.
    #[derive(Deserialize, Default)]
    ClothingLayer { #[default] Base, Mid, Top, Top2, Top3 }
}

#[cfg(test)]
mod tests {
    use super::*;

    named_enum! {
        Weather { Clear, Blizzard, Fog }
    }

    named_enum! {
        HostWeather { Clear, Fog }
    }

    #[test]
    fn test_every_body_region_has_a_clothing_region() {
        for region in BodyRegion::VARIANTS {
            let translated: ClothingRegion = translate_enum(*region).unwrap();
            assert_eq!(translated.name(), region.name());
        }
    }

    #[test]
    fn test_unmapped_value_is_an_error() {
        assert_eq!(translate_enum::<Weather, HostWeather>(Weather::Fog), Ok(HostWeather::Fog));
        assert_eq!(
            translate_enum::<Weather, HostWeather>(Weather::Blizzard),
            Err(MappingError::UnmappedEnum {
                source_type: "Weather",
                target_type: "HostWeather",
                value: "Blizzard",
            })
        );
    }

    #[test]
    fn test_from_name_is_exact() {
        assert_eq!(ClothingLayer::from_name("Top2"), Some(ClothingLayer::Top2));
        assert_eq!(ClothingLayer::from_name("top2"), None);
    }

    #[test]
    fn test_descriptor_enums_deserialize_by_name() {
        let region: BodyRegion = serde_json::from_str("\"Chest\"").unwrap();
        assert_eq!(region, BodyRegion::Chest);
        assert!(serde_json::from_str::<BodyRegion>("\"Tail\"").is_err());
    }

    #[test]
    fn test_clothing_layer_defaults_to_base() {
        assert_eq!(ClothingLayer::default(), ClothingLayer::Base);
        assert_eq!(ClothingLayer::VARIANTS.len(), 5);
    }
}
