//! Typed form of automapped descriptor JSON.
//!
//! A descriptor is a JSON object keyed by class name:
//!
//! ```json
//! {
//!   "ModGenericComponent": { "MaxHP": 100, "DaysToDecay": 30 },
//!   "ModSharpenableBehaviour": { "Tools": ["GEAR_Whetstone"] }
//! }
//! ```
//!
//! Each field either has a default or is required. Classes this crate does
//! not map are kept as raw JSON in [`DescriptorDocument::other`].

use serde::Deserialize;

use super::enums::{BodyRegion, ClothingLayer};
use super::error::{MappingError, MappingResult};
use crate::entry::strip_bom;

/// 3-D vector, written in JSON as a 3-element number array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ONE: Vector3 = Vector3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

fn default_inspect_distance() -> f32 {
    0.4
}

fn default_inspect_scale() -> Vector3 {
    Vector3::ONE
}

/// Fields shared by every gear item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDescriptor {
    #[serde(rename = "DisplayNameLocalizationId", default)]
    pub display_name_id: String,

    #[serde(rename = "DescriptionLocalizatonId", default)]
    pub description_id: String,

    #[serde(rename = "Weight", default)]
    pub weight_kg: f32,

    #[serde(rename = "MaxHP")]
    pub max_hp: f32,

    #[serde(rename = "DaysToDecay", default)]
    pub days_to_decay: f32,

    #[serde(rename = "PickUpAudio", default)]
    pub pick_up_audio: String,

    #[serde(rename = "PutBackAudio", default)]
    pub put_back_audio: String,

    #[serde(rename = "StowAudio", default)]
    pub stow_audio: String,

    #[serde(rename = "InspectDistance", default = "default_inspect_distance")]
    pub inspect_distance: f32,

    #[serde(rename = "InspectAngles", default)]
    pub inspect_angles: Vector3,

    #[serde(rename = "InspectOffset", default)]
    pub inspect_offset: Vector3,

    #[serde(rename = "InspectScale", default = "default_inspect_scale")]
    pub inspect_scale: Vector3,
}

/// `ModClothingComponent`: a gear item that can be worn.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClothingDescriptor {
    #[serde(flatten)]
    pub item: ItemDescriptor,

    pub region: BodyRegion,

    #[serde(default)]
    pub min_layer: ClothingLayer,
    #[serde(default)]
    pub max_layer: ClothingLayer,

    #[serde(default)]
    pub days_to_decay_worn_outside: f32,
    #[serde(default)]
    pub days_to_decay_worn_inside: f32,

    #[serde(default)]
    pub hours_to_dry_near_fire: f32,
    #[serde(default)]
    pub hours_to_dry_without_fire: f32,
    #[serde(default)]
    pub hours_to_freeze: f32,

    #[serde(default)]
    pub warmth: f32,
    #[serde(default)]
    pub warmth_when_wet: f32,
    /// Percent, 0 to 100.
    #[serde(default)]
    pub waterproofness: f32,
    #[serde(default)]
    pub windproof: f32,
    #[serde(default)]
    pub sprint_bar_reduction: f32,
    #[serde(default)]
    pub toughness: f32,

    #[serde(default)]
    pub main_texture: String,
    #[serde(default)]
    pub blend_texture: String,
    #[serde(default)]
    pub first_person_prefab_male: Option<String>,
    #[serde(default)]
    pub first_person_prefab_female: Option<String>,
    #[serde(default)]
    pub prevent_all_damage_from_source: bool,

    /// Percentage points.
    #[serde(default)]
    pub decrease_attack_chance: i32,
    /// Percentage points.
    #[serde(default)]
    pub increase_flee_chance: i32,
}

/// `ModSharpenableBehaviour`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SharpenableDescriptor {
    pub condition_max: f32,
    pub condition_min: f32,
    pub minutes_max: i32,
    pub minutes_min: i32,
    pub tools: Vec<String>,
    pub audio: String,
}

/// `ModAccelerantBehaviour`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AccelerantDescriptor {
    pub duration_offset: f32,
    pub success_modifier: f32,
    pub destroyed_on_use: bool,
}

/// A parsed automapped descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DescriptorDocument {
    #[serde(rename = "ModGenericComponent", default)]
    pub generic: Option<ItemDescriptor>,

    #[serde(rename = "ModClothingComponent", default)]
    pub clothing: Option<ClothingDescriptor>,

    #[serde(rename = "ModSharpenableBehaviour", default)]
    pub sharpenable: Option<SharpenableDescriptor>,

    #[serde(rename = "ModAccelerantBehaviour", default)]
    pub accelerant: Option<AccelerantDescriptor>,

    /// Classes without a mapper.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl DescriptorDocument {
    /// Parse descriptor text, ignoring a leading byte-order mark.
    pub fn parse(name: &str, text: &str) -> MappingResult<Self> {
        serde_json::from_str(strip_bom(text)).map_err(|e| MappingError::Descriptor {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Base item fields, from whichever item class is present.
    ///
    /// Clothing carries its own copy of the base fields and takes
    /// precedence over a generic component.
    pub fn item(&self) -> Option<&ItemDescriptor> {
        self.clothing
            .as_ref()
            .map(|clothing| &clothing.item)
            .or(self.generic.as_ref())
    }
}
