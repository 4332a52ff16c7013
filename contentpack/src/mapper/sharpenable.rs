use super::components::Sharpenable;
use super::descriptors::SharpenableDescriptor;
use super::error::MappingResult;
use super::target::ComponentTarget;
use super::Mapper;

pub struct SharpenableMapper;

impl Mapper for SharpenableMapper {
    const NAME: &'static str = "sharpenable";
    type Source = SharpenableDescriptor;

    fn configure<T: ComponentTarget>(target: &mut T) -> MappingResult<bool> {
        let Some(source) = target.component::<SharpenableDescriptor>().cloned() else {
            return Ok(false);
        };

        let sharpenable = target.attach_or_get::<Sharpenable>();
        sharpenable.condition_increase_max = source.condition_max;
        sharpenable.condition_increase_min = source.condition_min;
        sharpenable.duration_minutes_max = source.minutes_max;
        sharpenable.duration_minutes_min = source.minutes_min;
        sharpenable.requires_tool = !source.tools.is_empty();
        sharpenable.tool_choices = source.tools;
        sharpenable.audio = source.audio;

        Ok(true)
    }

    fn clear<T: ComponentTarget>(target: &mut T) {
        target.detach::<Sharpenable>();
    }
}
