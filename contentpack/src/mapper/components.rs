//! Runtime components populated by the mappers.
//!
//! These stand in for host-owned objects. Mappers only ever set their
//! fields; creation goes through [`ComponentTarget::attach_or_get`].
//!
//! [`ComponentTarget::attach_or_get`]: super::ComponentTarget::attach_or_get

use super::descriptors::Vector3;
use super::enums::{ClothingLayer, ClothingRegion};

/// Generic gear item settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GearItemConfig {
    pub display_name_id: String,
    pub description_id: String,
    pub weight_kg: f32,
    pub max_hp: f32,
    /// Condition lost per step.
    pub decay_per_step: f32,
    pub pick_up_audio: String,
    pub put_back_audio: String,
    pub stow_audio: String,
    pub inspect_distance: f32,
    pub inspect_angles: Vector3,
    pub inspect_offset: Vector3,
    pub inspect_scale: Vector3,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClothingItem {
    pub decay_per_step_worn_inside: f32,
    pub decay_per_step_worn_outside: f32,
    pub dry_bonus_when_not_worn: f32,
    pub dry_percent_per_hour: f32,
    pub dry_percent_per_hour_no_fire: f32,
    pub freeze_percent_per_hour: f32,
    pub region: Option<ClothingRegion>,
    pub min_layer: ClothingLayer,
    pub max_layer: ClothingLayer,
    pub paper_doll_texture: String,
    pub paper_doll_blendmap: String,
    pub warmth: f32,
    pub warmth_when_wet: f32,
    /// Fraction, 0 to 1.
    pub waterproofness: f32,
    pub windproof: f32,
    pub sprint_bar_reduction_percent: f32,
    pub toughness: f32,
    pub first_person_prefab_male: Option<String>,
    pub first_person_prefab_female: Option<String>,
    pub prevent_all_damage_from_source: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WolfIntimidationBuff {
    pub decrease_attack_chance_points: i32,
    pub increase_flee_points: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sharpenable {
    pub condition_increase_max: f32,
    pub condition_increase_min: f32,
    pub duration_minutes_max: i32,
    pub duration_minutes_min: i32,
    pub tool_choices: Vec<String>,
    pub requires_tool: bool,
    pub audio: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireStarterItem {
    pub is_accelerant: bool,
    pub duration_modifier: f32,
    pub skill_modifier: f32,
    pub consume_on_use: bool,
}
