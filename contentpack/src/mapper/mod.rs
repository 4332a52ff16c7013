//! Mapping of automapped descriptors onto host objects.
//!
//! Each [`Mapper`] covers one feature area. It reads a typed source marker
//! from the target, gets or creates its runtime component, and overwrites
//! every field it owns:
//!
//! | Mapper | Source marker | Runtime component |
//! |--------|---------------|-------------------|
//! | [`ItemMapper`] | [`ItemDescriptor`] | [`GearItemConfig`] |
//! | [`ClothingMapper`] | [`ClothingDescriptor`] | [`ClothingItem`], [`WolfIntimidationBuff`] |
//! | [`SharpenableMapper`] | [`SharpenableDescriptor`] | [`Sharpenable`] |
//! | [`AccelerantMapper`] | [`AccelerantDescriptor`] | [`FireStarterItem`] |
//!
//! A target without a given marker is skipped by that mapper.

mod accelerant;
mod clothing;
mod components;
mod descriptors;
mod enums;
mod error;
mod item;
mod sharpenable;
mod target;
mod units;

pub use accelerant::AccelerantMapper;
pub use clothing::{ClothingMapper, DRY_BONUS_WHEN_NOT_WORN};
pub use components::{
    ClothingItem, FireStarterItem, GearItemConfig, Sharpenable, WolfIntimidationBuff,
};
pub use descriptors::{
    AccelerantDescriptor, ClothingDescriptor, DescriptorDocument, ItemDescriptor,
    SharpenableDescriptor, Vector3,
};
pub use enums::{translate_enum, BodyRegion, ClothingLayer, ClothingRegion, NamedEnum};
pub use error::{MappingError, MappingResult};
pub use item::ItemMapper;
pub use sharpenable::SharpenableMapper;
pub use target::{ComponentTarget, GameObject};
pub use units::{decay_per_step, per_hour, percent_to_fraction, STEPS_PER_DAY};

use tracing::debug;

use crate::descriptor::{DescriptorCategory, DescriptorRegistry};

/// One feature-area mapping.
pub trait Mapper {
    /// Short name used in logs and reports.
    const NAME: &'static str;

    /// Source marker this mapper reads.
    type Source: 'static;

    /// Map the target's source marker onto its runtime component.
    ///
    /// Returns `Ok(false)` when the target has no source marker for this
    /// mapper.
    fn configure<T: ComponentTarget>(target: &mut T) -> MappingResult<bool>;

    /// Remove every runtime component this mapper creates.
    fn clear<T: ComponentTarget>(target: &mut T);
}

/// Runs every mapper against a target.
pub struct MapperLayer;

impl MapperLayer {
    /// Attach the document's classes to the target as source markers.
    ///
    /// For classes missing from the document the marker is removed together
    /// with the runtime components that mapper created earlier.
    pub fn attach_sources<T: ComponentTarget>(document: &DescriptorDocument, target: &mut T) {
        set_source::<ItemMapper, T>(target, document.item().cloned());
        set_source::<ClothingMapper, T>(target, document.clothing.clone());
        set_source::<SharpenableMapper, T>(target, document.sharpenable.clone());
        set_source::<AccelerantMapper, T>(target, document.accelerant.clone());
    }

    /// Run every mapper in order.
    ///
    /// Returns the names of the mappers that applied.
    pub fn configure<T: ComponentTarget>(target: &mut T) -> MappingResult<Vec<&'static str>> {
        let mut applied = Vec::new();
        run::<ItemMapper, T>(target, &mut applied)?;
        run::<ClothingMapper, T>(target, &mut applied)?;
        run::<SharpenableMapper, T>(target, &mut applied)?;
        run::<AccelerantMapper, T>(target, &mut applied)?;
        Ok(applied)
    }

    /// Look up the automapped descriptor `name`, attach it and map it.
    pub fn automap<T: ComponentTarget>(
        registry: &DescriptorRegistry,
        name: &str,
        target: &mut T,
    ) -> MappingResult<Vec<&'static str>> {
        let descriptor = registry
            .get(DescriptorCategory::Automapped, name)
            .ok_or_else(|| MappingError::MissingDescriptor(name.to_string()))?;

        let document = DescriptorDocument::parse(name, &descriptor.raw_text)?;
        Self::attach_sources(&document, target);

        let applied = Self::configure(target)?;
        debug!(
            object = %target.name(),
            descriptor = %name,
            mappers = ?applied,
            "Descriptor mapped"
        );
        Ok(applied)
    }
}

fn set_source<M: Mapper, T: ComponentTarget>(target: &mut T, source: Option<M::Source>) {
    match source {
        Some(source) => target.attach(source),
        None => {
            if target.detach::<M::Source>() {
                M::clear(target);
            }
        }
    }
}

fn run<M: Mapper, T: ComponentTarget>(
    target: &mut T,
    applied: &mut Vec<&'static str>,
) -> MappingResult<()> {
    if M::configure(target)? {
        applied.push(M::NAME);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const TOQUE: &str = r#"{
        "ModClothingComponent": {
            "MaxHP": 100,
            "DaysToDecay": 50,
            "Region": "Head",
            "MinLayer": "Base",
            "MaxLayer": "Mid",
            "DaysToDecayWornOutside": 10,
            "DaysToDecayWornInside": 20,
            "HoursToDryNearFire": 2,
            "HoursToDryWithoutFire": 4,
            "HoursToFreeze": 0,
            "Warmth": 1.5,
            "Waterproofness": 40,
            "FirstPersonPrefabMale": "",
            "FirstPersonPrefabFemale": "FP_Toque_F",
            "DecreaseAttackChance": 5
        }
    }"#;

    fn registry_with(name: &str, text: &str) -> DescriptorRegistry {
        let mut registry = DescriptorRegistry::new();
        registry.register(
            DescriptorCategory::Automapped,
            name,
            text,
            Path::new("/mods/a.modcomponent"),
        );
        registry
    }

    #[test]
    fn test_clothing_mapping() {
        let registry = registry_with("GEAR_Toque", TOQUE);
        let mut target = GameObject::new("GEAR_Toque");

        let applied = MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        assert_eq!(applied, vec!["item", "clothing"]);

        let clothing = target.component::<ClothingItem>().unwrap();
        assert!((clothing.decay_per_step_worn_outside - 100.0 / 240.0).abs() < 1e-6);
        assert!((clothing.decay_per_step_worn_inside - 100.0 / 480.0).abs() < 1e-6);
        assert_eq!(clothing.dry_bonus_when_not_worn, 1.5);
        assert_eq!(clothing.dry_percent_per_hour, 50.0);
        assert_eq!(clothing.dry_percent_per_hour_no_fire, 25.0);
        assert_eq!(clothing.freeze_percent_per_hour, 0.0);
        assert_eq!(clothing.region, Some(ClothingRegion::Head));
        assert_eq!(clothing.max_layer, ClothingLayer::Mid);
        assert_eq!(clothing.waterproofness, 0.4);
        assert_eq!(clothing.first_person_prefab_male, None);
        assert_eq!(clothing.first_person_prefab_female.as_deref(), Some("FP_Toque_F"));

        let buff = target.component::<WolfIntimidationBuff>().unwrap();
        assert_eq!(buff.decrease_attack_chance_points, 5);
        assert_eq!(buff.increase_flee_points, 0);

        let item = target.component::<GearItemConfig>().unwrap();
        assert!((item.decay_per_step - 100.0 / 1200.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_buff_without_intimidation() {
        let text = r#"{"ModClothingComponent": {"MaxHP": 10, "Region": "Feet"}}"#;
        let registry = registry_with("GEAR_Boots", text);
        let mut target = GameObject::new("GEAR_Boots");

        MapperLayer::automap(&registry, "GEAR_Boots", &mut target).unwrap();

        assert!(target.has::<ClothingItem>());
        assert!(!target.has::<WolfIntimidationBuff>());
    }

    #[test]
    fn test_behaviours() {
        let text = r#"{
            "ModGenericComponent": {"MaxHP": 100},
            "ModSharpenableBehaviour": {"ConditionMax": 5, "ConditionMin": 1, "MinutesMax": 30, "MinutesMin": 10, "Tools": ["GEAR_Whetstone"], "Audio": "Play_Sharpen"},
            "ModAccelerantBehaviour": {"DurationOffset": -0.5, "SuccessModifier": 15, "DestroyedOnUse": true}
        }"#;
        let registry = registry_with("GEAR_Knife", text);
        let mut target = GameObject::new("GEAR_Knife");

        let applied = MapperLayer::automap(&registry, "GEAR_Knife", &mut target).unwrap();
        assert_eq!(applied, vec!["item", "sharpenable", "accelerant"]);

        let sharpenable = target.component::<Sharpenable>().unwrap();
        assert!(sharpenable.requires_tool);
        assert_eq!(sharpenable.tool_choices, vec!["GEAR_Whetstone".to_string()]);
        assert_eq!(sharpenable.duration_minutes_max, 30);

        let fire_starter = target.component::<FireStarterItem>().unwrap();
        assert!(fire_starter.is_accelerant);
        assert!(fire_starter.consume_on_use);
        assert_eq!(fire_starter.skill_modifier, 15.0);
    }

    #[test]
    fn test_target_without_markers_is_untouched() {
        let mut target = GameObject::new("Empty");
        let applied = MapperLayer::configure(&mut target).unwrap();

        assert!(applied.is_empty());
        assert_eq!(target.component_count(), 0);
    }

    #[test]
    fn test_rerun_is_idempotent_and_overwrites() {
        let mut registry = registry_with("GEAR_Toque", TOQUE);
        let mut target = GameObject::new("GEAR_Toque");

        MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        let count = target.component_count();
        let first = target.component::<ClothingItem>().unwrap().clone();

        MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        assert_eq!(target.component_count(), count);
        assert_eq!(target.component::<ClothingItem>().unwrap(), &first);

        registry.register(
            DescriptorCategory::Automapped,
            "GEAR_Toque",
            TOQUE.replace("\"Warmth\": 1.5", "\"Warmth\": 3"),
            Path::new("/mods/b.modcomponent"),
        );
        MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        assert_eq!(target.component::<ClothingItem>().unwrap().warmth, 3.0);
    }

    #[test]
    fn test_rerun_removes_components_the_new_descriptor_no_longer_produces() {
        let mut registry = registry_with("GEAR_Toque", TOQUE);
        let mut target = GameObject::new("GEAR_Toque");
        MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        assert!(target.has::<WolfIntimidationBuff>());

        registry.register(
            DescriptorCategory::Automapped,
            "GEAR_Toque",
            TOQUE.replace("\"DecreaseAttackChance\": 5", "\"DecreaseAttackChance\": 0"),
            Path::new("/mods/b.modcomponent"),
        );
        MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        assert!(target.has::<ClothingItem>());
        assert!(!target.has::<WolfIntimidationBuff>());

        registry.register(
            DescriptorCategory::Automapped,
            "GEAR_Toque",
            r#"{"ModGenericComponent": {"MaxHP": 100}}"#,
            Path::new("/mods/c.modcomponent"),
        );
        let applied = MapperLayer::automap(&registry, "GEAR_Toque", &mut target).unwrap();
        assert_eq!(applied, vec!["item"]);
        assert!(!target.has::<ClothingDescriptor>());
        assert!(!target.has::<ClothingItem>());
        assert!(target.has::<GearItemConfig>());
    }

    #[test]
    fn test_host_components_without_marker_are_kept() {
        let registry = registry_with("GEAR_Rock", r#"{"ModGenericComponent": {"MaxHP": 1}}"#);
        let mut target = GameObject::new("GEAR_Rock");
        target.attach(Sharpenable::default());

        MapperLayer::automap(&registry, "GEAR_Rock", &mut target).unwrap();

        assert!(target.has::<Sharpenable>());
    }

    #[test]
    fn test_missing_descriptor() {
        let registry = DescriptorRegistry::new();
        let mut target = GameObject::new("GEAR_Ghost");

        assert_eq!(
            MapperLayer::automap(&registry, "GEAR_Ghost", &mut target),
            Err(MappingError::MissingDescriptor("GEAR_Ghost".to_string()))
        );
    }

    #[test]
    fn test_invalid_descriptor() {
        let registry = registry_with("GEAR_Bad", r#"{"ModClothingComponent": {"MaxHP": 1}}"#);
        let mut target = GameObject::new("GEAR_Bad");

        let err = MapperLayer::automap(&registry, "GEAR_Bad", &mut target).unwrap_err();
        assert!(matches!(err, MappingError::Descriptor { .. }));
        assert_eq!(target.component_count(), 0);
    }
}
