use super::components::FireStarterItem;
use super::descriptors::AccelerantDescriptor;
use super::error::MappingResult;
use super::target::ComponentTarget;
use super::Mapper;

pub struct AccelerantMapper;

impl Mapper for AccelerantMapper {
    const NAME: &'static str = "accelerant";
    type Source = AccelerantDescriptor;

    fn configure<T: ComponentTarget>(target: &mut T) -> MappingResult<bool> {
        let Some(source) = target.component::<AccelerantDescriptor>().cloned() else {
            return Ok(false);
        };

        let fire_starter = target.attach_or_get::<FireStarterItem>();
        fire_starter.is_accelerant = true;
        fire_starter.duration_modifier = source.duration_offset;
        fire_starter.skill_modifier = source.success_modifier;
        fire_starter.consume_on_use = source.destroyed_on_use;

        Ok(true)
    }

    fn clear<T: ComponentTarget>(target: &mut T) {
        target.detach::<FireStarterItem>();
    }
}
