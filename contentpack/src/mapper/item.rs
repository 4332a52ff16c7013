//! Generic gear item mapping.

use super::components::GearItemConfig;
use super::descriptors::ItemDescriptor;
use super::error::MappingResult;
use super::target::ComponentTarget;
use super::units::decay_per_step;
use super::Mapper;

pub struct ItemMapper;

impl Mapper for ItemMapper {
    const NAME: &'static str = "item";
    type Source = ItemDescriptor;

    fn configure<T: ComponentTarget>(target: &mut T) -> MappingResult<bool> {
        let Some(source) = target.component::<ItemDescriptor>().cloned() else {
            return Ok(false);
        };

        let item = target.attach_or_get::<GearItemConfig>();
        item.display_name_id = source.display_name_id;
        item.description_id = source.description_id;
        item.weight_kg = source.weight_kg;
        item.max_hp = source.max_hp;
        item.decay_per_step = decay_per_step(source.days_to_decay, source.max_hp);
        item.pick_up_audio = source.pick_up_audio;
        item.put_back_audio = source.put_back_audio;
        item.stow_audio = source.stow_audio;
        item.inspect_distance = source.inspect_distance;
        item.inspect_angles = source.inspect_angles;
        item.inspect_offset = source.inspect_offset;
        item.inspect_scale = source.inspect_scale;

        Ok(true)
    }

    fn clear<T: ComponentTarget>(target: &mut T) {
        target.detach::<GearItemConfig>();
    }
}
