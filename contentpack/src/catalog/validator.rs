//! Probes loaded catalogs through their witness asset.

use tracing::{debug, error};

use super::error::{CatalogError, CatalogResult};
use super::model::{CatalogDescriptor, CatalogState, StagedCatalog, ValidationOutcome};
use crate::entry::{file_name, file_stem};
use crate::host::{AssetKind, ResolvedAsset, ResourceHost};

/// Counts from one validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub verified: usize,
    pub failed: usize,
    pub untested: usize,
}

/// Splits a witness location into its stem and lowercase extension.
pub fn witness_parts(witness: &str) -> (&str, String) {
    let name = file_name(witness);
    let stem = file_stem(witness);
    let extension = if stem.len() < name.len() {
        name[stem.len() + 1..].to_lowercase()
    } else {
        String::new()
    };
    (stem, extension)
}

/// Checks that a loaded catalog can actually serve assets.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Resolve the witness asset of a catalog.
    ///
    /// The expected type comes from the witness extension. Lookup is by
    /// stem. A result without a name counts as not found.
    pub fn validate<H: ResourceHost>(host: &H, witness: &str) -> CatalogResult<ResolvedAsset> {
        let (stem, extension) = witness_parts(witness);
        let kind = AssetKind::for_extension(&extension)
            .ok_or_else(|| CatalogError::UnknownWitnessExtension(extension.clone()))?;

        host.resolve_typed_asset(stem, kind)
            .filter(|asset| !asset.name.is_empty())
            .ok_or_else(|| CatalogError::WitnessNotFound(witness.to_string()))
    }

    /// Probe every loaded catalog that has a witness.
    ///
    /// Only the validation outcome is updated; a failed probe never undoes
    /// the load.
    pub fn validate_all<H: ResourceHost>(host: &H, catalogs: &mut [StagedCatalog]) -> ValidationReport {
        let mut report = ValidationReport::default();

        for catalog in catalogs.iter_mut() {
            let CatalogState::Loaded { validation, .. } = &mut catalog.state else {
                continue;
            };

            *validation = Self::probe(host, &catalog.descriptor);
            match validation {
                ValidationOutcome::Verified => report.verified += 1,
                ValidationOutcome::Failed(_) => report.failed += 1,
                ValidationOutcome::Untested => report.untested += 1,
            }
        }

        report
    }

    fn probe<H: ResourceHost>(host: &H, descriptor: &CatalogDescriptor) -> ValidationOutcome {
        let Some(witness) = descriptor.witness_asset.as_deref() else {
            debug!(catalog = %descriptor.locator_id, "No witness asset, catalog not tested");
            return ValidationOutcome::Untested;
        };

        match Self::validate(host, witness) {
            Ok(asset) => {
                debug!(catalog = %descriptor.locator_id, asset = %asset.name, kind = %asset.kind, "Catalog test OK");
                ValidationOutcome::Verified
            }
            Err(e) => {
                let reason = e.to_string();
                let e = e.into_pack_error(descriptor.staged_path.display().to_string());
                error!(
                    catalog = %descriptor.locator_id,
                    pack = %descriptor.source_pack.display(),
                    witness = %witness,
                    kind = %e.kind(),
                    error = %e,
                    "Catalog test failed"
                );
                ValidationOutcome::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostResult, Locator};
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};

    /// Host that knows a fixed set of (name, kind) assets.
    struct KnownAssets(Vec<(&'static str, AssetKind)>);

    impl ResourceHost for KnownAssets {
        fn load_catalog(&mut self, _path: &Path) -> HostResult<Option<Locator>> {
            Ok(None)
        }

        fn resolve_typed_asset(&self, name: &str, kind: AssetKind) -> Option<ResolvedAsset> {
            self.0
                .iter()
                .find(|(n, k)| *n == name && *k == kind)
                .map(|(n, k)| ResolvedAsset {
                    name: n.to_string(),
                    kind: *k,
                })
        }
    }

    fn loaded(witness: Option<&str>) -> StagedCatalog {
        StagedCatalog {
            descriptor: CatalogDescriptor {
                locator_id: "items".to_string(),
                internal_ids: Vec::new(),
                bundle_dependencies: BTreeSet::from(["items.bundle".to_string()]),
                witness_asset: witness.map(str::to_string),
                staged_path: PathBuf::from("/s/A/items.json"),
                source_pack: PathBuf::from("/mods/A.modcomponent"),
                builtin_shaders: false,
            },
            state: CatalogState::Loaded {
                locator_id: "items".to_string(),
                validation: ValidationOutcome::Untested,
            },
        }
    }

    #[test]
    fn test_witness_parts() {
        assert_eq!(witness_parts("Assets/Items/Knife.PNG"), ("Knife", "png".to_string()));
        assert_eq!(witness_parts("Assets/noext"), ("noext", String::new()));
    }

    #[test]
    fn test_validate_by_extension() {
        let host = KnownAssets(vec![
            ("knife", AssetKind::Texture),
            ("steel", AssetKind::Material),
            ("GEAR_Knife", AssetKind::Prefab),
        ]);

        assert!(CatalogValidator::validate(&host, "a/knife.jpg").is_ok());
        assert!(CatalogValidator::validate(&host, "a/steel.mat").is_ok());
        assert!(CatalogValidator::validate(&host, "a/GEAR_Knife.prefab").is_ok());
        assert!(matches!(
            CatalogValidator::validate(&host, "a/knife.mat"),
            Err(CatalogError::WitnessNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_extension_fails_validation_only() {
        let host = KnownAssets(Vec::new());
        let mut catalogs = vec![loaded(Some("Assets/thing.xyz"))];

        let report = CatalogValidator::validate_all(&host, &mut catalogs);

        assert_eq!(report.failed, 1);
        match &catalogs[0].state {
            CatalogState::Loaded { validation, .. } => {
                assert!(matches!(validation, ValidationOutcome::Failed(r) if r.contains("xyz")))
            }
            other => panic!("catalog should stay loaded, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_witness_is_untested() {
        let host = KnownAssets(Vec::new());
        let mut catalogs = vec![loaded(None)];

        let report = CatalogValidator::validate_all(&host, &mut catalogs);

        assert_eq!(report.untested, 1);
    }

    struct NamelessAssets;

    impl ResourceHost for NamelessAssets {
        fn load_catalog(&mut self, _path: &Path) -> HostResult<Option<Locator>> {
            Ok(None)
        }

        fn resolve_typed_asset(&self, _name: &str, kind: AssetKind) -> Option<ResolvedAsset> {
            Some(ResolvedAsset {
                name: String::new(),
                kind,
            })
        }
    }

    #[test]
    fn test_nameless_asset_counts_as_missing() {
        assert!(matches!(
            CatalogValidator::validate(&NamelessAssets, "a/knife.png"),
            Err(CatalogError::WitnessNotFound(_))
        ));
    }
}
