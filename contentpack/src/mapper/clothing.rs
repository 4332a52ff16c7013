//! Clothing mapping.

use super::components::{ClothingItem, WolfIntimidationBuff};
use super::descriptors::ClothingDescriptor;
use super::enums::{translate_enum, ClothingRegion};
use super::error::MappingResult;
use super::target::ComponentTarget;
use super::units::{decay_per_step, per_hour, percent_to_fraction};
use super::Mapper;

/// Drying speed multiplier for clothing that is not being worn.
pub const DRY_BONUS_WHEN_NOT_WORN: f32 = 1.5;

pub struct ClothingMapper;

impl Mapper for ClothingMapper {
    const NAME: &'static str = "clothing";
    type Source = ClothingDescriptor;

    fn configure<T: ComponentTarget>(target: &mut T) -> MappingResult<bool> {
        let Some(source) = target.component::<ClothingDescriptor>().cloned() else {
            return Ok(false);
        };

        // Translate before touching the target so a bad region leaves it as is.
        let region: ClothingRegion = translate_enum(source.region)?;
        let max_hp = source.item.max_hp;

        let clothing = target.attach_or_get::<ClothingItem>();
        clothing.decay_per_step_worn_inside = decay_per_step(source.days_to_decay_worn_inside, max_hp);
        clothing.decay_per_step_worn_outside = decay_per_step(source.days_to_decay_worn_outside, max_hp);
        clothing.dry_bonus_when_not_worn = DRY_BONUS_WHEN_NOT_WORN;
        clothing.dry_percent_per_hour = per_hour(source.hours_to_dry_near_fire);
        clothing.dry_percent_per_hour_no_fire = per_hour(source.hours_to_dry_without_fire);
        clothing.freeze_percent_per_hour = per_hour(source.hours_to_freeze);

        clothing.region = Some(region);
        clothing.min_layer = source.min_layer;
        clothing.max_layer = source.max_layer;
        clothing.paper_doll_texture = source.main_texture;
        clothing.paper_doll_blendmap = source.blend_texture;

        clothing.warmth = source.warmth;
        clothing.warmth_when_wet = source.warmth_when_wet;
        clothing.waterproofness = percent_to_fraction(source.waterproofness);
        clothing.windproof = source.windproof;
        clothing.sprint_bar_reduction_percent = source.sprint_bar_reduction;
        clothing.toughness = source.toughness;

        clothing.first_person_prefab_male = source.first_person_prefab_male.filter(|p| !p.is_empty());
        clothing.first_person_prefab_female = source.first_person_prefab_female.filter(|p| !p.is_empty());
        clothing.prevent_all_damage_from_source = source.prevent_all_damage_from_source;

        if source.decrease_attack_chance != 0 || source.increase_flee_chance != 0 {
            let buff = target.attach_or_get::<WolfIntimidationBuff>();
            buff.decrease_attack_chance_points = source.decrease_attack_chance;
            buff.increase_flee_points = source.increase_flee_chance;
        } else {
            target.detach::<WolfIntimidationBuff>();
        }

        Ok(true)
    }

    fn clear<T: ComponentTarget>(target: &mut T) {
        target.detach::<ClothingItem>();
        target.detach::<WolfIntimidationBuff>();
    }
}
