//! Path-prefix routing of archive members to registrars.

use thiserror::Error;

use super::classify::{file_name, file_stem, EntryType};
use crate::descriptor::DescriptorCategory;

/// Why a member could not be routed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("json file does not have a valid internal path: {0}")]
    UnsupportedJsonPath(String),

    #[error("txt file not in the gear-spawns folder: {0}")]
    TextOutsideGearSpawns(String),

    #[error("asset bundle not in the bundle folder: {0}")]
    BundleOutsideBundleFolder(String),
}

/// Where a member goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// JSON descriptor stored under a category and forwarded to its registrar.
    Descriptor {
        category: DescriptorCategory,
        name: String,
    },
    /// Catalog manifest under `bundle/`, patched and staged.
    Catalog { file_name: String },
    /// Root `buildinfo.json`; logged, not stored.
    BuildInfo,
    /// Gear spawn text under `gear-spawns/`.
    GearSpawn { name: String },
    /// Binary bundle under `bundle/`, written to staging.
    StageBundle { file_name: String },
    /// Script assembly for the host's loader.
    Assembly { file_name: String },
    /// Audio bank for the host's sound engine.
    AudioBank { file_name: String },
    /// Not handled; skipped silently.
    Ignore,
}

const PREFIX_TABLE: &[(&str, DescriptorCategory)] = &[
    ("auto-mapped/", DescriptorCategory::Automapped),
    ("blueprints/", DescriptorCategory::Blueprint),
    ("recipes/", DescriptorCategory::Recipe),
    ("localizations/", DescriptorCategory::Localization),
];

const BUNDLE_PREFIX: &str = "bundle/";
const GEAR_SPAWN_PREFIX: &str = "gear-spawns/";
const BUILD_INFO_NAME: &str = "buildinfo.json";

/// Select the route for a classified member.
pub fn route(internal_path: &str, entry_type: EntryType) -> Result<Route, RouteError> {
    match entry_type {
        EntryType::Ignored => Ok(Route::Ignore),
        EntryType::Json => route_json(internal_path),
        EntryType::Text => {
            if internal_path.starts_with(GEAR_SPAWN_PREFIX) {
                Ok(Route::GearSpawn {
                    name: file_stem(internal_path).to_string(),
                })
            } else {
                Err(RouteError::TextOutsideGearSpawns(internal_path.to_string()))
            }
        }
        EntryType::CatalogAsset => {
            if internal_path.starts_with(BUNDLE_PREFIX) {
                Ok(Route::StageBundle {
                    file_name: file_name(internal_path).to_string(),
                })
            } else {
                Err(RouteError::BundleOutsideBundleFolder(
                    internal_path.to_string(),
                ))
            }
        }
        EntryType::ScriptAssembly => Ok(Route::Assembly {
            file_name: file_name(internal_path).to_string(),
        }),
        EntryType::AudioBank => Ok(Route::AudioBank {
            file_name: file_name(internal_path).to_string(),
        }),
    }
}

fn route_json(internal_path: &str) -> Result<Route, RouteError> {
    if let Some((_, category)) = PREFIX_TABLE
        .iter()
        .find(|(prefix, _)| internal_path.starts_with(prefix))
    {
        return Ok(Route::Descriptor {
            category: *category,
            name: file_stem(internal_path).to_string(),
        });
    }

    if internal_path.starts_with(BUNDLE_PREFIX) {
        return Ok(Route::Catalog {
            file_name: file_name(internal_path).to_string(),
        });
    }

    if internal_path.to_lowercase() == BUILD_INFO_NAME {
        return Ok(Route::BuildInfo);
    }

    Err(RouteError::UnsupportedJsonPath(internal_path.to_string()))
}
