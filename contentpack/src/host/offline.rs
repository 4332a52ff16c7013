//! Engine-free host backed by the staged catalog files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{AssetKind, ContentHost, HostError, HostResult, Locator, ResolvedAsset, ResourceHost};
use crate::catalog::{witness_parts, ContentCatalog};
use crate::entry::{extract_json_body, file_stem};

/// A host that answers catalog loads by reading the patched manifests.
///
/// A catalog loads when its staged file parses; its internal ids become the
/// locator keys. A typed asset resolves when any loaded catalog lists a
/// location with the same stem (case-insensitive) and an extension of the
/// requested kind. Content handed to the loaders and registrars is only
/// recorded.
///
/// Bundles cannot be opened without an engine; their asset names come from
/// [`OfflineHost::with_bundle_assets`] and default to none.
#[derive(Debug, Default)]
pub struct OfflineHost {
    catalogs: BTreeMap<String, Vec<String>>,
    bundle_assets: BTreeMap<String, Vec<String>>,
    assemblies: Vec<String>,
    audio_banks: Vec<String>,
    blueprints: Vec<String>,
    recipes: Vec<String>,
    localizations: Vec<String>,
    gear_spawn_records: usize,
}

impl OfflineHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the asset names of the bundle with the given file name.
    pub fn with_bundle_assets<I, S>(mut self, file_name: impl Into<String>, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bundle_assets
            .insert(file_name.into(), assets.into_iter().map(Into::into).collect());
        self
    }

    /// Locator ids of the loaded catalogs.
    pub fn loaded_catalogs(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn assemblies(&self) -> &[String] {
        &self.assemblies
    }

    pub fn audio_banks(&self) -> &[String] {
        &self.audio_banks
    }

    pub fn blueprints(&self) -> &[String] {
        &self.blueprints
    }

    pub fn recipes(&self) -> &[String] {
        &self.recipes
    }

    pub fn localizations(&self) -> &[String] {
        &self.localizations
    }

    /// Gear spawn records received, blank lines included.
    pub fn gear_spawn_records(&self) -> usize {
        self.gear_spawn_records
    }
}

impl ResourceHost for OfflineHost {
    fn load_catalog(&mut self, path: &Path) -> HostResult<Option<Locator>> {
        let bytes = fs::read(path)
            .map_err(|e| HostError::new(format!("could not read {}: {}", path.display(), e)))?;
        let body = extract_json_body(&bytes).map_err(|e| HostError::new(e.to_string()))?;
        let catalog: ContentCatalog =
            serde_json::from_str(body).map_err(|e| HostError::new(e.to_string()))?;

        let Some(keys) = catalog.internal_ids else {
            return Ok(None);
        };
        let id = catalog.locator_id.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        debug!(catalog = %id, keys = keys.len(), "Offline catalog loaded");
        self.catalogs.insert(id.clone(), keys.clone());
        Ok(Some(Locator::new(id, keys)))
    }

    fn list_bundle_assets(&mut self, path: &Path) -> HostResult<Vec<String>> {
        if !path.is_file() {
            return Err(HostError::new(format!("bundle not found: {}", path.display())));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(self.bundle_assets.get(&file_name).cloned().unwrap_or_default())
    }

    fn resolve_typed_asset(&self, name: &str, kind: AssetKind) -> Option<ResolvedAsset> {
        self.catalogs
            .values()
            .flatten()
            .find(|location| {
                let (stem, extension) = witness_parts(location);
                stem.eq_ignore_ascii_case(name) && AssetKind::for_extension(&extension) == Some(kind)
            })
            .map(|location| ResolvedAsset {
                name: file_stem(location).to_string(),
                kind,
            })
    }
}

impl ContentHost for OfflineHost {
    fn load_assembly(&mut self, file_name: &str, _bytes: &[u8]) -> HostResult<()> {
        self.assemblies.push(file_name.to_string());
        Ok(())
    }

    fn register_audio_bank(&mut self, file_name: &str, _bytes: &[u8]) -> HostResult<()> {
        self.audio_banks.push(file_name.to_string());
        Ok(())
    }

    fn register_blueprint(&mut self, name: &str, _text: &str) -> HostResult<()> {
        self.blueprints.push(name.to_string());
        Ok(())
    }

    fn register_recipe(&mut self, name: &str, _text: &str) -> HostResult<()> {
        self.recipes.push(name.to_string());
        Ok(())
    }

    fn register_localization(&mut self, name: &str, _text: &str) -> HostResult<()> {
        self.localizations.push(name.to_string());
        Ok(())
    }

    fn register_gear_spawns(&mut self, _source: &str, records: &[String]) -> HostResult<()> {
        self.gear_spawn_records += records.len();
        Ok(())
    }
}
