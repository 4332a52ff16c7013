//! Loads staged catalogs into the host resource system.

use std::path::Path;

use tracing::{debug, error};

use super::error::{CatalogError, CatalogResult};
use super::model::{CatalogState, StagedCatalog, ValidationOutcome};
use crate::host::{Locator, ResourceHost};

const CATALOG_EXTENSION: &str = "json";

/// Counts from one loading pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub failed: usize,
    /// Built-in shader catalogs and catalogs without bundle dependencies.
    pub skipped: usize,
}

/// Hands staged catalogs to a [`ResourceHost`].
pub struct CatalogLoader;

impl CatalogLoader {
    /// Whether a staged catalog should be loaded at all.
    pub fn should_load(catalog: &StagedCatalog) -> bool {
        catalog.descriptor.is_tracked() && !catalog.descriptor.bundle_dependencies.is_empty()
    }

    /// Load one staged manifest, blocking until the host completes.
    pub fn load<H: ResourceHost>(host: &mut H, staged_path: &Path) -> CatalogResult<Locator> {
        let extension = staged_path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        if extension != CATALOG_EXTENSION {
            return Err(CatalogError::InvalidExtension(extension));
        }

        let locator = host
            .load_catalog(staged_path)
            .map_err(|e| CatalogError::Host(e.message))?
            .ok_or(CatalogError::NullLocator)?;

        if !locator.has_keys() {
            return Err(CatalogError::NoKeys(locator.id));
        }
        Ok(locator)
    }

    /// Load every eligible catalog in staging order.
    ///
    /// A failure only affects the catalog it belongs to.
    pub fn load_all<H: ResourceHost>(host: &mut H, catalogs: &mut [StagedCatalog]) -> LoadReport {
        let mut report = LoadReport::default();

        for catalog in catalogs.iter_mut() {
            if !Self::should_load(catalog) {
                report.skipped += 1;
                continue;
            }

            let staged_path = catalog.descriptor.staged_path.clone();
            match Self::load(host, &staged_path) {
                Ok(locator) => {
                    debug!(catalog = %catalog.name(), keys = locator.keys.len(), "Catalog loaded");
                    catalog.state = CatalogState::Loaded {
                        locator_id: locator.id,
                        validation: ValidationOutcome::Untested,
                    };
                    report.loaded += 1;
                }
                Err(e) => {
                    let reason = e.to_string();
                    let e = e.into_pack_error(staged_path.display().to_string());
                    error!(
                        catalog = %catalog.name(),
                        pack = %catalog.descriptor.source_pack.display(),
                        kind = %e.kind(),
                        error = %e,
                        "Catalog failed to load"
                    );
                    catalog.state = CatalogState::LoadFailed(reason);
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogDescriptor;
    use crate::host::{AssetKind, HostError, HostResult, ResolvedAsset};
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    /// Host answering catalog loads from a fixed script keyed by file stem.
    #[derive(Default)]
    struct ScriptedHost {
        calls: Vec<PathBuf>,
    }

    impl ResourceHost for ScriptedHost {
        fn load_catalog(&mut self, path: &Path) -> HostResult<Option<Locator>> {
            self.calls.push(path.to_path_buf());
            let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
            match stem.as_str() {
                "broken" => Err(HostError::new("invalid catalog data")),
                "null" => Ok(None),
                "empty" => Ok(Some(Locator::new(stem.clone(), Vec::new()))),
                _ => Ok(Some(Locator::new(stem.clone(), vec!["key".to_string()]))),
            }
        }

        fn resolve_typed_asset(&self, _name: &str, _kind: AssetKind) -> Option<ResolvedAsset> {
            None
        }
    }

    fn staged(path: &str, bundles: &[&str], builtin_shaders: bool) -> StagedCatalog {
        let staged_path = PathBuf::from(path);
        StagedCatalog::new(CatalogDescriptor {
            locator_id: staged_path.file_stem().unwrap().to_string_lossy().into_owned(),
            internal_ids: Vec::new(),
            bundle_dependencies: bundles.iter().map(|b| b.to_string()).collect::<BTreeSet<_>>(),
            witness_asset: None,
            staged_path,
            source_pack: PathBuf::from("/mods/A.modcomponent"),
            builtin_shaders,
        })
    }

    #[test]
    fn test_load_all_isolates_failures() {
        let mut host = ScriptedHost::default();
        let mut catalogs = vec![
            staged("/s/A/good.json", &["a.bundle"], false),
            staged("/s/A/broken.json", &["b.bundle"], false),
            staged("/s/A/null.json", &["c.bundle"], false),
            staged("/s/A/empty.json", &["d.bundle"], false),
            staged("/s/A/after.json", &["e.bundle"], false),
        ];

        let report = CatalogLoader::load_all(&mut host, &mut catalogs);

        assert_eq!(report, LoadReport { loaded: 2, failed: 3, skipped: 0 });
        assert!(catalogs[0].state.is_loaded());
        assert!(matches!(catalogs[1].state, CatalogState::LoadFailed(_)));
        assert!(matches!(catalogs[2].state, CatalogState::LoadFailed(_)));
        assert!(matches!(catalogs[3].state, CatalogState::LoadFailed(_)));
        assert!(catalogs[4].state.is_loaded());
    }

    #[test]
    fn test_untracked_and_bundleless_catalogs_are_skipped() {
        let mut host = ScriptedHost::default();
        let mut catalogs = vec![
            staged("/s/A/catalog_unitybuiltinshaders.json", &["shaders.bundle"], true),
            staged("/s/A/nobundles.json", &[], false),
        ];

        let report = CatalogLoader::load_all(&mut host, &mut catalogs);

        assert_eq!(report.skipped, 2);
        assert!(host.calls.is_empty());
        assert_eq!(catalogs[0].state, CatalogState::Staged);
    }

    #[test]
    fn test_extension_must_be_exactly_json() {
        let mut host = ScriptedHost::default();
        let result = CatalogLoader::load(&mut host, Path::new("/s/A/catalog.JSON"));

        assert!(matches!(result, Err(CatalogError::InvalidExtension(ext)) if ext == "JSON"));
        assert!(host.calls.is_empty());
    }
}
