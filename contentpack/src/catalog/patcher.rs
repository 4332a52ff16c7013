//! Rewrites catalog manifests to point into the staging area.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use super::error::{CatalogError, CatalogResult};
use super::model::{CatalogDescriptor, ContentCatalog};
use super::staging::StagingArea;
use crate::entry::{extract_json_body, file_name, file_stem, has_bundle_suffix};
use crate::pack::pack_base_name;

/// Result of patching a manifest, before it is written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedCatalog {
    pub locator_id: String,
    pub internal_ids: Vec<String>,
    pub bundle_dependencies: BTreeSet<String>,
    pub witness_asset: Option<String>,
    /// Serialized manifest as it will be staged.
    pub json: String,
}

/// Patches catalog manifests and stages them.
#[derive(Debug, Clone)]
pub struct CatalogPatcher {
    builtin_shaders_marker: String,
}

impl CatalogPatcher {
    pub fn new(builtin_shaders_marker: impl Into<String>) -> Self {
        Self {
            builtin_shaders_marker: builtin_shaders_marker.into(),
        }
    }

    /// Whether a manifest file name marks the host's built-in shader catalog.
    pub fn is_builtin_shaders(&self, manifest_name: &str) -> bool {
        file_stem(manifest_name).contains(&self.builtin_shaders_marker)
    }

    /// Patch a manifest for a pack staged under `pack_dir`.
    ///
    /// Bundle locations become `<pack_dir>/<file name>` and their file names
    /// are collected as dependencies. The first other location becomes the
    /// witness. `m_LocatorId` is set to the manifest's stem.
    pub fn patch(&self, raw_json: &str, manifest_name: &str, pack_dir: &Path) -> CatalogResult<PatchedCatalog> {
        let mut catalog: ContentCatalog =
            serde_json::from_str(raw_json).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let internal_ids = catalog
            .internal_ids
            .as_mut()
            .filter(|ids| !ids.is_empty())
            .ok_or(CatalogError::EmptyInternalIds)?;

        let mut bundle_dependencies = BTreeSet::new();
        let mut witness_asset = None;

        for id in internal_ids.iter_mut() {
            if has_bundle_suffix(id) {
                let bundle = file_name(id).to_string();
                *id = pack_dir.join(&bundle).to_string_lossy().into_owned();
                bundle_dependencies.insert(bundle);
            } else if witness_asset.is_none() {
                witness_asset = Some(id.clone());
            }
        }

        let locator_id = file_stem(manifest_name).to_string();
        catalog.locator_id = Some(locator_id.clone());
        let internal_ids = internal_ids.clone();

        let json =
            serde_json::to_string(&catalog).map_err(|e| CatalogError::Serialize(e.to_string()))?;

        debug!(catalog = %locator_id, bundles = bundle_dependencies.len(), "Catalog internal ids patched");

        Ok(PatchedCatalog {
            locator_id,
            internal_ids,
            bundle_dependencies,
            witness_asset,
            json,
        })
    }

    /// Patch a manifest read from an archive and write it to staging.
    ///
    /// The raw bytes may carry a preamble before the first `{`.
    pub fn stage(
        &self,
        staging: &mut StagingArea,
        source_pack: &Path,
        manifest_name: &str,
        raw_bytes: &[u8],
    ) -> CatalogResult<CatalogDescriptor> {
        let raw_json = extract_json_body(raw_bytes).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let pack = pack_base_name(source_pack);
        let patched = self.patch(raw_json, manifest_name, &staging.pack_dir(&pack))?;

        let staged_path = staging
            .write_file(&pack, manifest_name, patched.json.as_bytes())
            .map_err(|e| CatalogError::io(staging.staged_path(&pack, manifest_name), e))?;

        let builtin_shaders = self.is_builtin_shaders(manifest_name);
        debug!(catalog = %patched.locator_id, path = %staged_path.display(), builtin_shaders, "Catalog written");

        Ok(CatalogDescriptor {
            locator_id: patched.locator_id,
            internal_ids: patched.internal_ids,
            bundle_dependencies: patched.bundle_dependencies,
            witness_asset: if builtin_shaders {
                None
            } else {
                patched.witness_asset
            },
            staged_path,
            source_pack: source_pack.to_path_buf(),
            builtin_shaders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{"m_LocatorId":"AddressablesMainContentCatalog","m_InternalIds":["{UnityEngine.AddressableAssets.Addressables.RuntimePath}/StandaloneWindows64/items_assets_all.bundle","Assets/Items/GEAR_Knife.prefab","Assets/Items/knife.png"],"m_ProviderIds":["BundledAssetProvider"]}"#;

    fn patcher() -> CatalogPatcher {
        CatalogPatcher::new("unitybuiltinshaders")
    }

    #[test]
    fn test_patch_rewrites_bundles_and_picks_witness() {
        let pack_dir = Path::new("/staging/Tools");
        let patched = patcher().patch(MANIFEST, "catalog_items.json", pack_dir).unwrap();

        assert_eq!(patched.locator_id, "catalog_items");
        assert_eq!(
            patched.internal_ids[0],
            pack_dir.join("items_assets_all.bundle").to_string_lossy()
        );
        assert_eq!(patched.internal_ids[1], "Assets/Items/GEAR_Knife.prefab");
        assert_eq!(
            patched.bundle_dependencies.iter().collect::<Vec<_>>(),
            vec!["items_assets_all.bundle"]
        );
        assert_eq!(
            patched.witness_asset.as_deref(),
            Some("Assets/Items/GEAR_Knife.prefab")
        );

        let value: serde_json::Value = serde_json::from_str(&patched.json).unwrap();
        assert_eq!(value["m_LocatorId"], "catalog_items");
        assert_eq!(value["m_ProviderIds"][0], "BundledAssetProvider");
    }

    #[test]
    fn test_patch_rejects_missing_or_empty_ids() {
        let dir = Path::new("/staging/A");
        assert!(matches!(
            patcher().patch("{}", "c.json", dir),
            Err(CatalogError::EmptyInternalIds)
        ));
        assert!(matches!(
            patcher().patch(r#"{"m_InternalIds":[]}"#, "c.json", dir),
            Err(CatalogError::EmptyInternalIds)
        ));
        assert!(matches!(
            patcher().patch("{\"m_InternalIds\":", "c.json", dir),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_catalog_without_other_assets_has_no_witness() {
        let patched = patcher()
            .patch(r#"{"m_InternalIds":["a.bundle","b.unity3d"]}"#, "c.json", Path::new("/s/A"))
            .unwrap();
        assert!(patched.witness_asset.is_none());
        assert_eq!(patched.bundle_dependencies.len(), 2);
    }

    #[test]
    fn test_stage_writes_patched_manifest() {
        let temp = TempDir::new().unwrap();
        let mut staging = StagingArea::create(temp.path().join("_staging")).unwrap();
        let raw = format!("\u{feff}{}", MANIFEST);

        let descriptor = patcher()
            .stage(
                &mut staging,
                Path::new("/mods/Tools.modcomponent"),
                "catalog_items.json",
                raw.as_bytes(),
            )
            .unwrap();

        assert_eq!(
            descriptor.staged_path,
            staging.root().join("Tools").join("catalog_items.json")
        );
        assert!(descriptor.is_testable());
        let written = fs::read_to_string(&descriptor.staged_path).unwrap();
        assert!(written.contains(&*staging.root().join("Tools").to_string_lossy()));
    }

    #[test]
    fn test_builtin_shaders_catalog_is_untracked() {
        let temp = TempDir::new().unwrap();
        let mut staging = StagingArea::create(temp.path().join("_staging")).unwrap();

        let descriptor = patcher()
            .stage(
                &mut staging,
                Path::new("/mods/Tools.modcomponent"),
                "catalog_unitybuiltinshaders.json",
                MANIFEST.as_bytes(),
            )
            .unwrap();

        assert!(descriptor.builtin_shaders);
        assert!(!descriptor.is_tracked());
        assert!(descriptor.witness_asset.is_none());
        assert_eq!(descriptor.bundle_dependencies.len(), 1);
        assert!(descriptor.staged_path.exists());
    }

    #[test]
    fn test_patching_twice_is_byte_identical() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("_staging");
        let pack = Path::new("/mods/Tools.modcomponent");

        let mut first = StagingArea::create(&root).unwrap();
        let descriptor = patcher()
            .stage(&mut first, pack, "catalog.json", MANIFEST.as_bytes())
            .unwrap();
        let first_bytes = fs::read(&descriptor.staged_path).unwrap();
        first.teardown().unwrap();

        let mut second = StagingArea::create(&root).unwrap();
        let descriptor = patcher()
            .stage(&mut second, pack, "catalog.json", MANIFEST.as_bytes())
            .unwrap();
        assert_eq!(fs::read(&descriptor.staged_path).unwrap(), first_bytes);
    }

    fn internal_id() -> impl Strategy<Value = String> {
        (
            "[a-z]{1,6}(/[a-z]{1,6}){0,2}",
            prop_oneof![
                Just(".bundle"),
                Just(".unity3d"),
                Just(".prefab"),
                Just(".png"),
                Just(".mat"),
            ],
        )
            .prop_map(|(path, ext)| format!("{}{}", path, ext))
    }

    proptest! {
        #[test]
        fn prop_bundle_ids_point_into_staging(ids in prop::collection::vec(internal_id(), 1..12)) {
            let pack_dir = Path::new("/staging/Pack");
            let raw = serde_json::json!({ "m_InternalIds": ids }).to_string();
            let patched = patcher().patch(&raw, "catalog.json", pack_dir).unwrap();

            let mut expected_bundles = BTreeSet::new();
            for (original, patched_id) in ids.iter().zip(&patched.internal_ids) {
                if has_bundle_suffix(original) {
                    let name = file_name(original);
                    prop_assert!(Path::new(patched_id).is_absolute());
                    prop_assert!(patched_id.starts_with("/staging/Pack"));
                    prop_assert!(patched_id.ends_with(name));
                    expected_bundles.insert(name.to_string());
                } else {
                    prop_assert_eq!(patched_id, original);
                }
            }
            prop_assert_eq!(&patched.bundle_dependencies, &expected_bundles);

            let first_other = ids.iter().find(|id| !has_bundle_suffix(id));
            prop_assert_eq!(patched.witness_asset.as_ref(), first_other);
        }
    }
}
